use std::path::{Path, PathBuf};

use serde::Serialize;
use songfix_core::SchemaCatalog;
use songfix_generate::{Clock, FixtureEngine, FixtureReport};
use tracing::info;

use crate::error::CliError;
use crate::workspace::{DeliveredPair, FixtureSettings, deliver_pair};

/// Inputs of one `generate` invocation after flag parsing.
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    pub schemas: Option<PathBuf>,
    pub name: Option<String>,
    pub version: Option<u32>,
    pub out: Option<PathBuf>,
}

/// What a `generate` invocation wrote.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateOutcome {
    pub schema: String,
    pub version: u32,
    pub sequence_name: String,
    #[serde(flatten)]
    pub delivered: DeliveredPair,
    pub report: FixtureReport,
}

pub fn load_catalog(path: &Path) -> Result<SchemaCatalog, CliError> {
    let contents = std::fs::read_to_string(path)?;
    let catalog = SchemaCatalog::from_json(&contents)?;
    info!(path = %path.display(), schemas = catalog.len(), "schema catalog loaded");
    Ok(catalog)
}

/// One line per schema name: `name<TAB>versions`, versions highest first.
pub fn list_schemas(catalog: &SchemaCatalog) -> Vec<String> {
    catalog
        .names()
        .into_iter()
        .map(|name| {
            let versions: Vec<String> = catalog
                .versions(name)
                .iter()
                .map(u32::to_string)
                .collect();
            format!("{name}\t{}", versions.join(","))
        })
        .collect()
}

pub fn resolve_schemas_path(
    flag: Option<PathBuf>,
    settings: &FixtureSettings,
) -> Result<PathBuf, CliError> {
    flag.or_else(|| settings.schemas_path.clone()).ok_or_else(|| {
        CliError::InvalidConfig(
            "no schema registry document; pass --schemas or set schemas_path".to_string(),
        )
    })
}

pub fn generate_fixtures(
    request: GenerateRequest,
    settings: &FixtureSettings,
    clock: &dyn Clock,
) -> Result<GenerateOutcome, CliError> {
    let schemas_path = resolve_schemas_path(request.schemas, settings)?;
    let catalog = load_catalog(&schemas_path)?;

    let schema = catalog.select(request.name.as_deref(), request.version);
    if schema.is_none() && (request.name.is_some() || request.version.is_some()) {
        return Err(CliError::SchemaNotFound {
            name: request
                .name
                .or_else(|| catalog.default_name().map(str::to_string))
                .unwrap_or_default(),
            version: request
                .version
                .map(|version| version.to_string())
                .unwrap_or_else(|| "latest".to_string()),
        });
    }

    let engine = FixtureEngine::new(settings.generate_options());
    let pair = engine.generate(schema, clock.now())?;
    engine.verify(&pair)?;

    let out_dir = request.out.unwrap_or_else(|| settings.out_dir.clone());
    let delivered = deliver_pair(&out_dir, &pair)?;
    info!(
        sequence = %delivered.sequence_path.display(),
        table = %delivered.table_path.display(),
        "fixture pair delivered"
    );

    Ok(GenerateOutcome {
        schema: pair.report.schema.clone(),
        version: pair.report.version,
        sequence_name: pair.identifiers.sequence_name,
        delivered,
        report: pair.report,
    })
}
