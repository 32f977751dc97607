use std::io::Read;

use lift_core::{EffectKind, KpiList, KpiListError, KpiRow, PresetRepository, Service, ServiceKpis, StoreError};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when importing KPI rows.
///
/// `row` is the 1-based data row, not counting the header.
#[derive(Debug, Error)]
pub enum KpiLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Row {row}: unknown service '{value}' (expected blueprint, ops or accelerator)")]
    UnknownService { row: usize, value: String },

    #[error("Row {row}: unknown effect '{value}'")]
    UnknownEffect { row: usize, value: String },

    #[error("Row {row}: KPI id must not be empty")]
    MissingId { row: usize },

    #[error("Row {row}: {source}")]
    DuplicateId {
        row: usize,
        #[source]
        source: KpiListError,
    },

    #[error("Repository error: {0}")]
    Repository(#[from] StoreError),
}

impl From<csv::Error> for KpiLoaderError {
    fn from(err: csv::Error) -> Self {
        KpiLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from a KPI CSV file.
///
/// - `service`: `blueprint`, `ops` or `accelerator`
/// - `id`: unique within its service
/// - `label`: free text, may be empty
/// - `effect`: effect short code, e.g. `conv_pct` or `impl_cost`
/// - `value`: number in the effect's unit
/// - `enabled`: optional; empty or absent means enabled
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct KpiRecord {
    pub service: String,
    pub id: String,
    #[serde(default)]
    pub label: String,
    pub effect: String,
    pub value: Decimal,
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub enabled: Option<bool>,
}

fn deserialize_optional_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => match text.to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" | "1" => Ok(Some(true)),
            "false" | "no" | "n" | "0" => Ok(Some(false)),
            _ => Err(serde::de::Error::custom(format!(
                "invalid enabled flag '{text}'"
            ))),
        },
    }
}

/// KPI lists read from a file, grouped by service in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KpiImport {
    lists: Vec<(Service, KpiList)>,
}

impl KpiImport {
    pub fn services(&self) -> Vec<Service> {
        self.lists.iter().map(|(service, _)| *service).collect()
    }

    pub fn list(
        &self,
        service: Service,
    ) -> Option<&KpiList> {
        self.lists
            .iter()
            .find(|(candidate, _)| *candidate == service)
            .map(|(_, list)| list)
    }

    pub fn row_count(&self) -> usize {
        self.lists.iter().map(|(_, list)| list.len()).sum()
    }

    /// Replaces the list of every imported service; the rest are untouched.
    pub fn apply_to(
        &self,
        kpis: &mut ServiceKpis,
    ) {
        for (service, list) in &self.lists {
            *kpis.for_service_mut(*service) = list.clone();
        }
    }

    fn list_mut(
        &mut self,
        service: Service,
    ) -> &mut KpiList {
        let index = match self.lists.iter().position(|(candidate, _)| *candidate == service) {
            Some(index) => index,
            None => {
                self.lists.push((service, KpiList::new()));
                self.lists.len() - 1
            }
        };
        &mut self.lists[index].1
    }
}

/// Loader for KPI rows from CSV files.
pub struct KpiCsvLoader;

impl KpiCsvLoader {
    /// Parse raw records from a CSV reader. Headers are matched by name and
    /// surrounding whitespace is trimmed.
    pub fn parse_records<R: Read>(reader: R) -> Result<Vec<KpiRecord>, KpiLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: KpiRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Parse and validate a CSV into per-service KPI lists.
    pub fn parse<R: Read>(reader: R) -> Result<KpiImport, KpiLoaderError> {
        let records = Self::parse_records(reader)?;
        Self::build(records)
    }

    /// Turn raw records into typed rows, checking service, effect and id.
    pub fn build(records: Vec<KpiRecord>) -> Result<KpiImport, KpiLoaderError> {
        let mut import = KpiImport::default();

        for (index, record) in records.into_iter().enumerate() {
            let row = index + 1;
            let service = Service::parse(&record.service).ok_or_else(|| {
                KpiLoaderError::UnknownService {
                    row,
                    value: record.service.clone(),
                }
            })?;
            let effect = EffectKind::parse(&record.effect).ok_or_else(|| {
                KpiLoaderError::UnknownEffect {
                    row,
                    value: record.effect.clone(),
                }
            })?;
            if record.id.is_empty() {
                return Err(KpiLoaderError::MissingId { row });
            }

            let mut kpi = KpiRow::new(record.id, record.label, effect, record.value);
            kpi.enabled = record.enabled.unwrap_or(true);

            import
                .list_mut(service)
                .push(kpi)
                .map_err(|source| KpiLoaderError::DuplicateId { row, source })?;
        }

        Ok(import)
    }

    /// Replace the imported services' KPI lists in the stored preset `name`.
    ///
    /// Returns the number of rows written. Loading the same file twice
    /// leaves the preset unchanged.
    pub async fn load<R: PresetRepository + ?Sized>(
        repo: &R,
        name: &str,
        import: &KpiImport,
    ) -> Result<usize, KpiLoaderError> {
        let mut preset = repo.get_preset(name).await?;
        import.apply_to(&mut preset.kpis);
        repo.save_preset(&preset).await?;

        debug!(
            preset = name,
            services = ?import.services(),
            rows = import.row_count(),
            "Imported KPI rows"
        );
        Ok(import.row_count())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const TEST_CSV: &str = "service,id,label,effect,value,enabled
blueprint,conv,Checkout redesign,conv_pct,5,true
blueprint,aov,Bundles,aov_pct,7.5,
blueprint,impl,Tooling,impl_cost,300,false
ops,hours,Automation,hours_per_week,10,yes
accelerator,ret,Lifecycle email,retention_pct,3,
";

    #[test]
    fn test_parse_single_record() {
        let csv = "service,id,label,effect,value,enabled\nblueprint,conv,Checkout,conv_pct,5,true";

        let records = KpiCsvLoader::parse_records(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(
            records,
            vec![KpiRecord {
                service: "blueprint".to_string(),
                id: "conv".to_string(),
                label: "Checkout".to_string(),
                effect: "conv_pct".to_string(),
                value: dec!(5),
                enabled: Some(true),
            }]
        );
    }

    #[test]
    fn test_enabled_column_is_optional() {
        let csv = "service,id,label,effect,value\nops,hours,,hours_per_week,10";

        let import = KpiCsvLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        let row = import
            .list(Service::OpsDevLab)
            .and_then(|list| list.get("hours"))
            .expect("row imported");
        assert!(row.enabled);
        assert_eq!(row.label, "");
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let csv = "service , id , label , effect , value , enabled\n  blueprint , conv , A , conv_pct , 5 , no ";

        let import = KpiCsvLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        let row = import
            .list(Service::Blueprint)
            .and_then(|list| list.get("conv"))
            .expect("row imported");
        assert_eq!(row.value, dec!(5));
        assert!(!row.enabled);
    }

    #[test]
    fn test_parse_groups_by_service() {
        let import = KpiCsvLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(
            import.services(),
            vec![Service::Blueprint, Service::OpsDevLab, Service::Accelerator]
        );
        assert_eq!(import.row_count(), 5);

        let blueprint = import.list(Service::Blueprint).expect("blueprint rows");
        let ids: Vec<_> = blueprint.iter().map(|row| row.id.as_str()).collect();
        assert_eq!(ids, vec!["conv", "aov", "impl"]);
        assert!(blueprint.get("aov").expect("aov").enabled);
        assert!(!blueprint.get("impl").expect("impl").enabled);
        assert_eq!(
            blueprint.get("impl").expect("impl").effect,
            EffectKind::MonthlyImplementationCost
        );
    }

    #[test]
    fn test_unknown_service_reports_row() {
        let csv = "service,id,label,effect,value\nblueprint,a,,conv_pct,1\nmarketing,b,,conv_pct,1";

        let err = KpiCsvLoader::parse(csv.as_bytes()).expect_err("Should reject service");

        let KpiLoaderError::UnknownService { row, value } = err else {
            panic!("Expected UnknownService, got: {:?}", err);
        };
        assert_eq!(row, 2);
        assert_eq!(value, "marketing");
    }

    #[test]
    fn test_unknown_effect_reports_row() {
        let csv = "service,id,label,effect,value\nblueprint,a,,bogus,1";

        let err = KpiCsvLoader::parse(csv.as_bytes()).expect_err("Should reject effect");

        assert_eq!(err.to_string(), "Row 1: unknown effect 'bogus'");
    }

    #[test]
    fn test_duplicate_id_within_service_is_rejected() {
        let csv = "service,id,label,effect,value\nblueprint,a,,conv_pct,1\nops,a,,hours_per_week,2\nblueprint,a,,aov_pct,3";

        let err = KpiCsvLoader::parse(csv.as_bytes()).expect_err("Should reject duplicate");

        assert!(matches!(err, KpiLoaderError::DuplicateId { row: 3, .. }));
    }

    #[test]
    fn test_empty_id_is_rejected() {
        let csv = "service,id,label,effect,value\nblueprint,,,conv_pct,1";

        let err = KpiCsvLoader::parse(csv.as_bytes()).expect_err("Should reject empty id");

        assert!(matches!(err, KpiLoaderError::MissingId { row: 1 }));
    }

    #[test]
    fn test_bad_value_is_csv_error() {
        let csv = "service,id,label,effect,value\nblueprint,a,,conv_pct,abc";

        let err = KpiCsvLoader::parse(csv.as_bytes()).expect_err("Should reject value");

        assert!(matches!(err, KpiLoaderError::CsvParse(_)));
    }

    #[test]
    fn test_bad_enabled_flag_is_csv_error() {
        let csv = "service,id,label,effect,value,enabled\nblueprint,a,,conv_pct,1,maybe";

        let err = KpiCsvLoader::parse(csv.as_bytes()).expect_err("Should reject flag");

        let KpiLoaderError::CsvParse(msg) = err else {
            panic!("Expected CsvParse error, got: {:?}", err);
        };
        assert!(msg.contains("maybe"), "Expected flag in error, got: {}", msg);
    }

    #[test]
    fn test_missing_column() {
        let csv = "service,id,label\nblueprint,a,x";

        let err = KpiCsvLoader::parse(csv.as_bytes()).expect_err("Should fail for missing column");

        let KpiLoaderError::CsvParse(msg) = err else {
            panic!("Expected CsvParse error, got: {:?}", err);
        };
        assert!(msg.contains("missing field"), "got: {}", msg);
    }

    #[test]
    fn test_apply_replaces_only_imported_services() {
        let csv = "service,id,label,effect,value\nops,hours,,hours_per_week,4";
        let import = KpiCsvLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");
        let untouched =
            KpiList::try_from(vec![KpiRow::new("conv", "", EffectKind::ConversionUplift, dec!(5))])
                .expect("unique ids");
        let mut kpis = ServiceKpis {
            blueprint: untouched.clone(),
            ops_dev_lab: KpiList::try_from(vec![
                KpiRow::new("old", "", EffectKind::ErrorReduction, dec!(10)),
            ])
            .expect("unique ids"),
            ..ServiceKpis::default()
        };

        import.apply_to(&mut kpis);

        assert_eq!(kpis.blueprint, untouched);
        assert_eq!(kpis.ops_dev_lab.len(), 1);
        assert!(kpis.ops_dev_lab.get("old").is_none());
        assert_eq!(kpis.ops_dev_lab.get("hours").map(|row| row.value), Some(dec!(4)));
    }
}
