//! Documentation cross-link data
//!
//! Service models are scanned for their documentation uid and service identifier;
//! the identifier is normalised into a client class name and both mappings are
//! substituted into an HTML redirect template.

pub mod model;
pub mod naming;
pub mod template;

pub use model::{scan_services, ServiceModel};
pub use naming::client_class_name;

use crate::error::Result;
use crate::warning::PipelineWarning;
use std::collections::{BTreeMap, HashMap};

/// Mapping tables substituted into the redirect template
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CrosslinkTables {
    /// Documentation uid -> module name
    pub uid_to_module: BTreeMap<String, String>,
    /// Module name -> client class name
    pub module_to_client: BTreeMap<String, String>,
}

impl CrosslinkTables {
    /// Build both tables, reporting models that cannot take part in uid lookups
    pub fn from_models(models: &[ServiceModel]) -> (Self, Vec<PipelineWarning>) {
        let mut tables = CrosslinkTables::default();
        let mut warnings = Vec::new();

        for model in models {
            let client = client_class_name(&model.service_id);
            if let Some(previous) = tables
                .module_to_client
                .insert(model.module.clone(), client.clone())
            {
                if previous != client {
                    warnings.push(PipelineWarning::DuplicateModule {
                        module: model.module.clone(),
                        path: model.path.clone(),
                    });
                }
            }

            match &model.uid {
                Some(uid) => {
                    let module = model.module.clone();
                    tables.uid_to_module.insert(uid.clone(), module);
                }
                None => warnings.push(PipelineWarning::ModelWithoutUid {
                    path: model.path.clone(),
                }),
            }
        }

        (tables, warnings)
    }

    /// Fill the redirect template with both tables
    pub fn render(&self, template_text: &str) -> Result<String> {
        let mut values = HashMap::new();
        values.insert(
            template::UID_SERVICE_MAPPING,
            template::render_mapping(&self.uid_to_module),
        );
        values.insert(
            template::SERVICE_CLIENT_MAPPING,
            template::render_mapping(&self.module_to_client),
        );
        template::fill_template(template_text, &values)
    }
}
