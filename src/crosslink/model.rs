use crate::error::{ChangelogError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File name of a service API definition
pub const SERVICE_MODEL_FILE: &str = "service-2.json";

const CODEGEN_RESOURCES_DIR: &str = "codegen-resources";

/// Identifying metadata of one service model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceModel {
    /// Module (directory) name of the service, e.g. `dynamodb`
    pub module: String,
    /// Documentation uid, e.g. `dynamodb-2012-08-10`
    pub uid: Option<String>,
    /// Identifier the client class name is derived from
    pub service_id: String,
    pub path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct RawModel {
    metadata: RawMetadata,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMetadata {
    uid: Option<String>,
    service_id: Option<String>,
    service_abbreviation: Option<String>,
    service_full_name: Option<String>,
}

/// Find every service model under `root`, in path order
pub fn find_service_models(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(ChangelogError::config(format!(
            "services root not found: {}",
            root.display()
        )));
    }

    let mut models = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| ChangelogError::Io(e.into()))?;
        if entry.file_type().is_file() && entry.file_name() == SERVICE_MODEL_FILE {
            models.push(entry.into_path());
        }
    }

    tracing::debug!(root = %root.display(), count = models.len(), "found service models");
    Ok(models)
}

/// Module name for a model path.
///
/// `services/<module>/src/main/resources/codegen-resources/service-2.json` -> `<module>`,
/// any other layout uses the model's parent directory name.
pub fn module_name(model_path: &Path) -> Option<String> {
    let parent = model_path.parent()?;
    let owner = if parent.file_name()? == CODEGEN_RESOURCES_DIR {
        parent.ancestors().nth(4).unwrap_or(parent)
    } else {
        parent
    };
    owner.file_name().map(|n| n.to_string_lossy().into_owned())
}

/// Read the identifying metadata of one service model
pub fn load_service_model(path: &Path) -> Result<ServiceModel> {
    let contents = fs::read_to_string(path)?;
    let raw: RawModel =
        serde_json::from_str(&contents).map_err(|e| ChangelogError::parse(path, e))?;

    let metadata = raw.metadata;
    let service_id = metadata
        .service_id
        .or(metadata.service_abbreviation)
        .or(metadata.service_full_name)
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| {
            ChangelogError::service_model("no serviceId, serviceAbbreviation or serviceFullName")
                .in_file(path)
        })?;

    let module = module_name(path).ok_or_else(|| {
        ChangelogError::service_model(format!(
            "cannot derive module name from {}",
            path.display()
        ))
    })?;

    Ok(ServiceModel {
        module,
        uid: metadata.uid.filter(|uid| !uid.trim().is_empty()),
        service_id,
        path: path.to_path_buf(),
    })
}

/// Load every service model under `root`
pub fn scan_services(root: &Path) -> Result<Vec<ServiceModel>> {
    find_service_models(root)?
        .iter()
        .map(|path| load_service_model(path))
        .collect()
}
