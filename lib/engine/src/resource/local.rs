use super::prelude::{Error, Resource, ResourceAttributes, SearchFilter, SearchOptions};
use cartouche_prelude::TemplateData;
use std::borrow::Cow;
use std::fs::{read_to_string, File};
use std::io::{BufReader, ErrorKind};
use std::path::PathBuf;

#[derive(Clone, Debug, serde::Deserialize)]
pub struct Config {
    pub path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: PathBuf::new().join("resources"),
        }
    }
}

impl From<Config> for LocalResourceClient {
    fn from(value: Config) -> Self {
        Self::new(value.path)
    }
}

fn default_data_path() -> String {
    "data.json".into()
}

#[derive(Debug, serde::Deserialize)]
struct LocalMetadata {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    thumbnail: Option<String>,
    #[serde(default = "default_data_path")]
    data: String,
}

fn io_error(err: std::io::Error, what: &'static str) -> Error {
    match err.kind() {
        ErrorKind::NotFound => Error::not_found(what),
        ErrorKind::PermissionDenied => Error::forbidden(what),
        _ => Error::Transport(format!("{what}: {err}")),
    }
}

/// Resource catalog stored on the filesystem, one directory per resource.
#[derive(Clone, Debug)]
pub struct LocalResourceClient {
    root: PathBuf,
}

impl LocalResourceClient {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn metadata(&self, id: &str) -> Result<LocalMetadata, Error> {
        if id.is_empty() || id.contains('/') || id.contains('\\') || id == ".." {
            return Err(Error::not_found(Cow::Borrowed("invalid resource id")));
        }
        let path = self.root.join(id).join("metadata.json");
        let file = File::open(path).map_err(|err| {
            tracing::debug!("unable to open metadata of {}: {:?}", id, err);
            io_error(err, "unable to open metadata")
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|err| {
            tracing::debug!("unable to parse metadata of {}: {:?}", id, err);
            Error::Decoding(format!("invalid metadata for resource {id}: {err}"))
        })
    }

    pub(super) async fn search(
        &self,
        filter: &SearchFilter,
        options: &SearchOptions,
    ) -> Result<Vec<Resource>, Error> {
        tracing::debug!("searching resources {:?} in {:?}", filter.ids, self.root);
        let mut result = Vec::with_capacity(filter.ids.len());
        for id in filter.ids.iter() {
            let metadata = match self.metadata(id) {
                Ok(found) => found,
                Err(Error::Status { status: 404, .. }) => continue,
                Err(other) => return Err(other),
            };
            if !filter.accepts(id, metadata.category.as_deref()) {
                continue;
            }
            result.push(Resource {
                id: id.clone(),
                name: metadata.name,
                description: metadata.description,
                attributes: ResourceAttributes {
                    thumbnail: metadata.thumbnail.filter(|_| options.include_attributes),
                },
            });
        }
        Ok(result
            .into_iter()
            .skip(options.start as usize)
            .take(options.limit as usize)
            .collect())
    }

    pub(super) async fn get_data(&self, id: &str) -> Result<TemplateData, Error> {
        tracing::debug!("loading data of resource {}", id);
        let metadata = self.metadata(id)?;
        let path = self.root.join(id).join(metadata.data);
        read_to_string(path).map(TemplateData::Text).map_err(|err| {
            tracing::debug!("unable to read data of {}: {:?}", id, err);
            io_error(err, "unable to read data")
        })
    }
}
