//! Shared state for command implementations

use crate::OutputFormat;
use anyhow::Result;
use recycling_api_client::{ClientConfig, RecyclingClient};
use recycling_cli::progress;
use recycling_core::config::Config;
use recycling_core::{Error, ErrorCode};
use recycling_geo::{Catalog, GeoCoordinate};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Loaded configuration plus global flags
pub struct Context {
    pub config: Config,
    pub format: OutputFormat,
}

impl Context {
    pub fn new(config: Config, format: OutputFormat) -> Self {
        Self { config, format }
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Catalog from `--catalog`, then `catalog.path`, then the demo points
    pub fn catalog(&self, explicit: Option<&str>) -> Result<Catalog> {
        let path = explicit.or(self.config.schema.catalog.path.as_deref());

        let Some(path) = path else {
            debug!("Using demo catalog");
            return Ok(Catalog::demo());
        };

        let catalog = Catalog::from_path(path).map_err(|e| {
            Error::new(ErrorCode::CatalogError, e.to_string())
                .with_context(format!("Loading catalog {path}"))
        })?;
        debug!(path, points = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    pub fn location_timeout(&self) -> Duration {
        self.config.schema.location.timeout()
    }

    /// Backend client: `RECYCLING_API_URL` wins over the `[api]` table
    pub fn client(&self) -> Result<RecyclingClient> {
        let config = if std::env::var_os("RECYCLING_API_URL").is_some() {
            ClientConfig::from_env().map_err(Error::from)?
        } else {
            ClientConfig::from_schema(&self.config.schema.api)
        };
        debug!(base_url = %config.base_url, "Backend client configured");
        Ok(RecyclingClient::with_config(config).map_err(Error::from)?)
    }

    /// Spinner shown only for text output
    pub fn spinner(&self, message: &str) -> progress::ProgressBar {
        if self.is_json() {
            progress::hidden()
        } else {
            progress::spinner(message)
        }
    }

    pub fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

/// Validated coordinate from optional `--lat`/`--lng` flags
pub fn coordinate_arg(lat: Option<f64>, lng: Option<f64>) -> Result<Option<GeoCoordinate>> {
    match (lat, lng) {
        (Some(lat), Some(lng)) => {
            let at = GeoCoordinate::new(lat, lng).map_err(|e| {
                Error::new(ErrorCode::InvalidCoordinate, e.to_string())
                    .with_suggestion("Latitude must be within [-90, 90] and longitude within [-180, 180]")
            })?;
            Ok(Some(at))
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_arg() {
        assert!(coordinate_arg(None, None).unwrap().is_none());
        assert!(coordinate_arg(Some(1.0), None).unwrap().is_none());

        let at = coordinate_arg(Some(-23.55), Some(-46.63)).unwrap().unwrap();
        assert_eq!(at.latitude(), -23.55);

        let err = coordinate_arg(Some(91.0), Some(0.0)).unwrap_err();
        let core = err.downcast_ref::<Error>().unwrap();
        assert_eq!(core.code, ErrorCode::InvalidCoordinate);
    }

    #[test]
    fn test_catalog_defaults_to_demo() {
        let ctx = Context::new(Config::default(), OutputFormat::Text);
        assert_eq!(ctx.catalog(None).unwrap().len(), 3);
    }

    #[test]
    fn test_catalog_missing_file() {
        let ctx = Context::new(Config::default(), OutputFormat::Json);
        let err = ctx.catalog(Some("/nonexistent/points.json")).unwrap_err();
        let core = err.downcast_ref::<Error>().unwrap();
        assert_eq!(core.code, ErrorCode::CatalogError);
    }
}
