//! Template workflow coordinator.
//!
//! Each request goes through its own sequence of actions. The actions are
//! reduced on the store as soon as they are emitted, so that concurrent
//! readers see the loading state, and are returned to the caller in emission
//! order.

use crate::error::WorkflowError;
use crate::resource::{ResourceClient, SearchFilter, SearchOptions, Session};
use crate::store::Store;
use crate::{format, merge, replace};
use cartouche_prelude::{Action, CurrentMap, Request, Template, TemplateData};

#[derive(Clone, Debug, serde::Deserialize)]
pub struct Config {
    /// Name of the control holding the templates panel.
    #[serde(default = "Config::default_control")]
    pub control: String,
    /// Category of the templates in the resource catalog.
    #[serde(default = "Config::default_category")]
    pub category: String,
    /// Ids of the templates available in the current context.
    #[serde(default)]
    pub context: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            control: Self::default_control(),
            category: Self::default_category(),
            context: Vec::new(),
        }
    }
}

impl Config {
    fn default_control() -> String {
        "mapTemplates".into()
    }

    fn default_category() -> String {
        "TEMPLATE".into()
    }
}

#[derive(Clone, Copy, Debug)]
enum Mode {
    Merge,
    Replace,
}

impl Mode {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Merge => "merge",
            Self::Replace => "replace",
        }
    }
}

struct Emitter<'a> {
    store: &'a Store,
    actions: Vec<Action>,
}

impl<'a> Emitter<'a> {
    fn new(store: &'a Store) -> Self {
        Self {
            store,
            actions: Vec::new(),
        }
    }

    fn emit(&mut self, action: Action) {
        self.store.dispatch(&action);
        self.actions.push(action);
    }
}

#[derive(Debug)]
pub(crate) struct Coordinator {
    resources: ResourceClient,
    config: Config,
}

impl Coordinator {
    pub(crate) fn new(resources: ResourceClient, config: Config) -> Self {
        Self { resources, config }
    }

    pub(crate) async fn handle(
        &self,
        request: Request,
        store: &Store,
        current: &CurrentMap,
        session: &Session,
    ) -> Vec<Action> {
        metrics::counter!("template_workflow", "request" => request.kind()).increment(1);
        let mut emitter = Emitter::new(store);
        match request {
            Request::OpenTemplatesPanel => self.open_panel(&mut emitter, session).await,
            Request::MergeTemplate { id } => {
                self.apply(&mut emitter, &id, current, session, Mode::Merge)
                    .await
            }
            Request::ReplaceTemplate { id } => {
                self.apply(&mut emitter, &id, current, session, Mode::Replace)
                    .await
            }
            Request::ClearTemplates => {
                tracing::debug!("clearing templates");
                store.clear();
            }
        }
        emitter.actions
    }

    async fn open_panel(&self, emitter: &mut Emitter<'_>, session: &Session) {
        emitter.emit(Action::SetControlProperty {
            control: self.config.control.clone(),
            property: "enabled".into(),
            value: serde_json::Value::Bool(true),
        });
        if emitter.store.is_loaded() {
            tracing::debug!("templates already loaded");
            return;
        }
        match self.search_templates(session).await {
            Ok(templates) => {
                metrics::counter!("template_panel", "status" => "success").increment(1);
                emitter.emit(Action::SetTemplates { templates });
                emitter.emit(Action::SetTemplatesLoaded {
                    loaded: true,
                    error: None,
                });
            }
            Err(err) => {
                metrics::counter!("template_panel", "status" => "failure").increment(1);
                tracing::error!("unable to load templates: {:?}", err);
                emitter.emit(Action::SetTemplatesLoaded {
                    loaded: true,
                    error: Some(err.to_string()),
                });
            }
        }
    }

    async fn search_templates(
        &self,
        session: &Session,
    ) -> Result<Vec<Template>, crate::resource::Error> {
        let ids = &self.config.context;
        if ids.is_empty() {
            tracing::debug!("no template configured for the current context");
            return Ok(Vec::new());
        }
        let filter = SearchFilter {
            category: self.config.category.clone(),
            ids: ids.clone(),
        };
        let options = SearchOptions {
            include_attributes: true,
            start: 0,
            limit: u32::try_from(ids.len()).unwrap_or(u32::MAX),
        };
        let mut resources = self.resources.search(&filter, &options, session).await?;
        // keep the order of the context
        Ok(ids
            .iter()
            .filter_map(|id| {
                let index = resources.iter().position(|item| item.id == *id)?;
                Some(Template::from(resources.swap_remove(index)))
            })
            .collect())
    }

    async fn apply(
        &self,
        emitter: &mut Emitter<'_>,
        id: &str,
        current: &CurrentMap,
        session: &Session,
        mode: Mode,
    ) {
        tracing::debug!("applying template {} with mode {}", id, mode.as_str());
        emitter.emit(Action::template_loading(id, true));
        match self.run(emitter, id, current, session, mode).await {
            Ok(()) => {
                emitter.emit(Action::template_loading(id, false));
            }
            Err(err) => {
                metrics::counter!(
                    "template_workflow_error",
                    "mode" => mode.as_str(),
                    "reason" => err.reason()
                )
                .increment(1);
                tracing::error!("unable to {} template: {:?}", mode.as_str(), err);
                emitter.emit(Action::template_loading(id, false));
                emitter.emit(Action::ShowError {
                    notification: err.notification(),
                });
            }
        }
    }

    async fn run(
        &self,
        emitter: &mut Emitter<'_>,
        id: &str,
        current: &CurrentMap,
        session: &Session,
        mode: Mode,
    ) -> Result<(), WorkflowError> {
        let Some(data) = self.resolve(emitter, id, session).await? else {
            tracing::debug!("template {} has no data, nothing to apply", id);
            return Ok(());
        };
        let Some(config) = format::normalize(&data).map_err(|err| WorkflowError::parse(id, err))?
        else {
            tracing::debug!("template {} is not a map configuration", id);
            return Ok(());
        };
        let action = match mode {
            Mode::Merge => Action::ConfigureMap {
                config: merge::merge(&current.config, config),
                map_id: current.map_id.clone(),
                zoom_to_extent: false,
            },
            Mode::Replace => {
                let result = replace::replace(
                    config,
                    current.config.zoom(),
                    current.config.center().cloned(),
                );
                Action::ConfigureMap {
                    config: result.config,
                    map_id: current.map_id.clone(),
                    zoom_to_extent: result.zoom_to_extent,
                }
            }
        };
        emitter.emit(action);
        Ok(())
    }

    async fn resolve(
        &self,
        emitter: &mut Emitter<'_>,
        id: &str,
        session: &Session,
    ) -> Result<Option<TemplateData>, WorkflowError> {
        if let Some(template) = emitter.store.template(id).filter(|item| item.data_loaded) {
            tracing::debug!("using cached data of template {}", id);
            return Ok(template.data);
        }
        let data = self
            .resources
            .get_data(id, session)
            .await
            .map_err(|err| WorkflowError::from_resource(id, err, session))?;
        emitter.emit(Action::SetTemplateData {
            id: id.to_string(),
            data: data.clone(),
        });
        Ok(Some(data))
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, Coordinator};
    use crate::resource::{http, Config as ResourceConfig, Session};
    use crate::store::{Store, TemplatesState};
    use cartouche_prelude::map::MapId;
    use cartouche_prelude::{Action, CurrentMap, Request, Template, TemplateData};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn coordinator(url: String, context: &[&str]) -> Coordinator {
        let resources = ResourceConfig::Http(http::Config {
            url,
            params: Default::default(),
            headers: Default::default(),
        })
        .build()
        .unwrap();
        Coordinator::new(
            resources,
            Config {
                context: context.iter().map(|id| id.to_string()).collect(),
                ..Default::default()
            },
        )
    }

    fn current() -> CurrentMap {
        serde_json::from_value(serde_json::json!({
            "mapId": 1,
            "config": {
                "version": 2,
                "map": {
                    "center": {"x": 2.35, "y": 48.85, "crs": "EPSG:4326"},
                    "zoom": 12,
                    "layers": [{"id": "mapnik__0", "group": "background", "visibility": true}],
                },
                "widgetsConfig": {"widgets": [{"id": "chart"}]},
            },
        }))
        .unwrap()
    }

    fn template_data() -> serde_json::Value {
        serde_json::json!({
            "map": {
                "layers": [{"id": "rivers__1", "group": "Hydrography", "visibility": true}],
                "groups": [{"id": "Hydrography", "nodes": ["rivers__1"]}],
            },
            "widgetsConfig": {"widgets": [{"id": "table"}]},
        })
    }

    fn count_loading_end(actions: &[Action]) -> usize {
        actions
            .iter()
            .filter(|item| matches!(item, Action::SetTemplateLoading { loading: false, .. }))
            .count()
    }

    fn error_message(actions: &[Action]) -> Option<&str> {
        actions.iter().find_map(|item| match item {
            Action::ShowError { notification } => Some(notification.message.as_str()),
            _ => None,
        })
    }

    fn configured_map(actions: &[Action]) -> Option<(&cartouche_prelude::MapConfiguration, bool)> {
        actions.iter().find_map(|item| match item {
            Action::ConfigureMap {
                config,
                zoom_to_extent,
                ..
            } => Some((config, *zoom_to_extent)),
            _ => None,
        })
    }

    async fn failing_merge(status: u16, session: Session) -> Vec<Action> {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/12"))
            .respond_with(ResponseTemplate::new(status))
            .expect(1)
            .mount(&mock_server)
            .await;
        let store = Store::default();
        coordinator(mock_server.uri(), &[])
            .handle(
                Request::MergeTemplate { id: "12".into() },
                &store,
                &current(),
                &session,
            )
            .await
    }

    #[tokio::test]
    async fn merge_uses_cached_data_without_fetching() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;
        let store = Store::new(TemplatesState {
            templates: vec![Template::new("12", "hydrography")
                .with_data(TemplateData::Structured(template_data()))],
            loaded: true,
            error: None,
        });

        let actions = coordinator(mock_server.uri(), &[])
            .handle(
                Request::MergeTemplate { id: "12".into() },
                &store,
                &current(),
                &Session::anonymous(),
            )
            .await;

        assert_eq!(actions.len(), 3);
        assert_eq!(actions[0], Action::template_loading("12", true));
        assert_eq!(actions[2], Action::template_loading("12", false));
        match &actions[1] {
            Action::ConfigureMap {
                config,
                map_id,
                zoom_to_extent,
            } => {
                assert!(config.widgets_config.is_none());
                assert_eq!(config.map.as_ref().unwrap().layers.len(), 2);
                assert_eq!(config.zoom(), Some(12.0));
                assert_eq!(map_id, &Some(MapId::Number(1)));
                assert!(!zoom_to_extent);
            }
            other => panic!("unexpected action {other:?}"),
        }
        assert!(!store.template("12").unwrap().loading);
    }

    #[tokio::test]
    async fn merge_fetches_data_only_once() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/12"))
            .respond_with(ResponseTemplate::new(200).set_body_json(template_data()))
            .expect(1)
            .mount(&mock_server)
            .await;
        let store = Store::default();
        let coordinator = coordinator(mock_server.uri(), &[]);

        let first = coordinator
            .handle(
                Request::MergeTemplate { id: "12".into() },
                &store,
                &current(),
                &Session::anonymous(),
            )
            .await;
        assert!(matches!(first[1], Action::SetTemplateData { .. }));
        assert!(configured_map(&first).is_some());
        assert!(store.template("12").unwrap().data_loaded);

        let second = coordinator
            .handle(
                Request::MergeTemplate { id: "12".into() },
                &store,
                &current(),
                &Session::anonymous(),
            )
            .await;
        assert!(!second
            .iter()
            .any(|item| matches!(item, Action::SetTemplateData { .. })));
        assert!(configured_map(&second).is_some());
        assert_eq!(count_loading_end(&second), 1);
    }

    #[tokio::test]
    async fn forbidden_while_anonymous_asks_to_login() {
        let actions = failing_merge(403, Session::anonymous()).await;
        assert_eq!(error_message(&actions), Some("mapTemplates.errors.pleaseLogin"));
        assert_eq!(count_loading_end(&actions), 1);
        assert!(configured_map(&actions).is_none());
    }

    #[tokio::test]
    async fn forbidden_while_authenticated_is_not_accessible() {
        let actions = failing_merge(403, Session::authorized("Bearer token")).await;
        assert_eq!(
            error_message(&actions),
            Some("mapTemplates.errors.notAccessible")
        );
        assert_eq!(count_loading_end(&actions), 1);
    }

    #[tokio::test]
    async fn missing_template_is_not_found() {
        let actions = failing_merge(404, Session::anonymous()).await;
        assert_eq!(error_message(&actions), Some("mapTemplates.errors.notFound"));
        assert_eq!(count_loading_end(&actions), 1);
    }

    #[tokio::test]
    async fn server_error_is_unknown() {
        let actions = failing_merge(500, Session::anonymous()).await;
        assert_eq!(
            error_message(&actions),
            Some("mapTemplates.errors.unknownError")
        );
        assert_eq!(count_loading_end(&actions), 1);
        // the error comes after the end of loading
        assert!(matches!(actions.last(), Some(Action::ShowError { .. })));
    }

    #[tokio::test]
    async fn malformed_text_fails_to_parse() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/12"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"map\": ["))
            .mount(&mock_server)
            .await;
        let store = Store::default();
        let actions = coordinator(mock_server.uri(), &[])
            .handle(
                Request::ReplaceTemplate { id: "12".into() },
                &store,
                &current(),
                &Session::anonymous(),
            )
            .await;
        assert_eq!(
            error_message(&actions),
            Some("mapTemplates.errors.unknownError")
        );
        assert_eq!(count_loading_end(&actions), 1);
        assert!(configured_map(&actions).is_none());
    }

    #[tokio::test]
    async fn structured_data_without_map_changes_nothing() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/12"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"widgets": []})),
            )
            .mount(&mock_server)
            .await;
        let store = Store::default();
        let actions = coordinator(mock_server.uri(), &[])
            .handle(
                Request::MergeTemplate { id: "12".into() },
                &store,
                &current(),
                &Session::anonymous(),
            )
            .await;
        assert!(configured_map(&actions).is_none());
        assert!(error_message(&actions).is_none());
        assert_eq!(count_loading_end(&actions), 1);
    }

    #[tokio::test]
    async fn replace_keeps_current_view_and_zooms_to_extent() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/12"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                serde_json::json!({
                    "map": {
                        "bbox": {
                            "bounds": {"minx": 6.6, "miny": 36.6, "maxx": 18.5, "maxy": 47.1},
                            "crs": "EPSG:4326",
                        },
                        "layers": [{"id": "rivers__1"}],
                    },
                    "widgetsConfig": {"widgets": []},
                })
                .to_string(),
            ))
            .mount(&mock_server)
            .await;
        let store = Store::default();
        let actions = coordinator(mock_server.uri(), &[])
            .handle(
                Request::ReplaceTemplate { id: "12".into() },
                &store,
                &current(),
                &Session::anonymous(),
            )
            .await;
        let (config, zoom_to_extent) = configured_map(&actions).unwrap();
        assert!(zoom_to_extent);
        assert_eq!(config.zoom(), Some(12.0));
        assert_eq!(config.center().unwrap().y, 48.85);
        assert_eq!(config.map.as_ref().unwrap().layers.len(), 1);
        assert!(config.widgets_config.is_some());
        assert_eq!(count_loading_end(&actions), 1);
    }

    #[tokio::test]
    async fn open_panel_searches_templates_once() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/resources/search/list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ResourceList": {
                    "Resource": [
                        {"id": 13, "name": "second"},
                        {"id": 12, "name": "first"},
                    ]
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
        let store = Store::default();
        let coordinator = coordinator(mock_server.uri(), &["12", "13", "14"]);

        let actions = coordinator
            .handle(
                Request::OpenTemplatesPanel,
                &store,
                &CurrentMap::default(),
                &Session::anonymous(),
            )
            .await;
        assert_eq!(actions.len(), 3);
        assert_eq!(
            actions[0],
            Action::SetControlProperty {
                control: "mapTemplates".into(),
                property: "enabled".into(),
                value: serde_json::Value::Bool(true),
            }
        );
        match &actions[1] {
            Action::SetTemplates { templates } => {
                let ids: Vec<_> = templates.iter().map(|item| item.id.as_str()).collect();
                assert_eq!(ids, vec!["12", "13"]);
            }
            other => panic!("unexpected action {other:?}"),
        }
        assert_eq!(
            actions[2],
            Action::SetTemplatesLoaded {
                loaded: true,
                error: None
            }
        );

        let actions = coordinator
            .handle(
                Request::OpenTemplatesPanel,
                &store,
                &CurrentMap::default(),
                &Session::anonymous(),
            )
            .await;
        assert_eq!(actions.len(), 1);
        assert_eq!(store.snapshot().templates.len(), 2);
    }

    #[tokio::test]
    async fn open_panel_reports_search_failure() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/resources/search/list"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;
        let store = Store::default();
        let actions = coordinator(mock_server.uri(), &["12"])
            .handle(
                Request::OpenTemplatesPanel,
                &store,
                &CurrentMap::default(),
                &Session::anonymous(),
            )
            .await;
        assert!(matches!(
            actions.last(),
            Some(Action::SetTemplatesLoaded {
                loaded: true,
                error: Some(_)
            })
        ));
        let state = store.snapshot();
        assert!(state.loaded);
        assert!(state.error.is_some());
    }

    #[tokio::test]
    async fn open_panel_without_context_skips_search() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;
        let store = Store::default();
        let actions = coordinator(mock_server.uri(), &[])
            .handle(
                Request::OpenTemplatesPanel,
                &store,
                &CurrentMap::default(),
                &Session::anonymous(),
            )
            .await;
        assert_eq!(
            actions[1],
            Action::SetTemplates {
                templates: Vec::new()
            }
        );
        assert!(store.is_loaded());
    }

    #[tokio::test]
    async fn clear_resets_the_store() {
        let store = Store::new(TemplatesState {
            templates: vec![Template::new("12", "first")],
            loaded: true,
            error: None,
        });
        let actions = coordinator("http://localhost".into(), &[])
            .handle(
                Request::ClearTemplates,
                &store,
                &CurrentMap::default(),
                &Session::anonymous(),
            )
            .await;
        assert!(actions.is_empty());
        assert_eq!(store.snapshot(), TemplatesState::default());
    }
}
