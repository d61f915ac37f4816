use cartouche_prelude::{Action, Template};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// State of the templates, as seen by the templates panel.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct TemplatesState {
    pub templates: Vec<Template>,
    pub loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TemplatesState {
    pub fn find(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|item| item.id == id)
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut Template> {
        self.templates.iter_mut().find(|item| item.id == id)
    }

    pub fn reduce(&mut self, action: &Action) {
        match action {
            Action::SetTemplates { templates } => {
                self.templates = templates.clone();
            }
            Action::SetTemplatesLoaded { loaded, error } => {
                self.loaded = *loaded;
                self.error = error.clone();
            }
            Action::SetTemplateData { id, data } => match self.find_mut(id) {
                Some(template) => {
                    template.data = Some(data.clone());
                    template.data_loaded = true;
                }
                None => {
                    self.templates
                        .push(Template::new(id.as_str(), id.as_str()).with_data(data.clone()));
                }
            },
            Action::SetTemplateLoading { id, loading } => {
                if let Some(template) = self.find_mut(id) {
                    template.loading = *loading;
                }
            }
            Action::ConfigureMap { .. }
            | Action::ShowError { .. }
            | Action::SetControlProperty { .. } => {}
        }
    }
}

/// Shared handle on the templates state. The lock is never held across an
/// await point.
#[derive(Clone, Debug, Default)]
pub struct Store(Arc<RwLock<TemplatesState>>);

impl Store {
    pub fn new(state: TemplatesState) -> Self {
        Self(Arc::new(RwLock::new(state)))
    }

    fn read(&self) -> RwLockReadGuard<'_, TemplatesState> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, TemplatesState> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> TemplatesState {
        self.read().clone()
    }

    pub fn template(&self, id: &str) -> Option<Template> {
        self.read().find(id).cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.read().loaded
    }

    pub fn dispatch(&self, action: &Action) {
        self.write().reduce(action);
    }

    pub fn clear(&self) {
        *self.write() = TemplatesState::default();
    }
}
