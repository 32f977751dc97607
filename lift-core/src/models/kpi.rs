use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::EffectKind;

/// Errors raised when editing a [`KpiList`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KpiListError {
    #[error("KPI id '{0}' already exists in this list")]
    DuplicateId(String),

    #[error("no KPI with id '{0}'")]
    UnknownId(String),
}

/// One assumed improvement attributed to a service.
///
/// Only `effect`, `value` and `enabled` take part in calculations; `label`
/// is free text for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiRow {
    pub id: String,
    #[serde(default)]
    pub label: String,
    pub effect: EffectKind,
    pub value: Decimal,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

impl KpiRow {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        effect: EffectKind,
        value: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            effect,
            value,
            enabled: true,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Ordered KPI rows with unique ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<KpiRow>", into = "Vec<KpiRow>")]
pub struct KpiList {
    rows: Vec<KpiRow>,
}

impl KpiList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `row`, rejecting an id that is already present.
    pub fn push(
        &mut self,
        row: KpiRow,
    ) -> Result<(), KpiListError> {
        if self.get(&row.id).is_some() {
            return Err(KpiListError::DuplicateId(row.id));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn remove(
        &mut self,
        id: &str,
    ) -> Result<KpiRow, KpiListError> {
        let index = self.index_of(id)?;
        Ok(self.rows.remove(index))
    }

    pub fn set_enabled(
        &mut self,
        id: &str,
        enabled: bool,
    ) -> Result<(), KpiListError> {
        let index = self.index_of(id)?;
        self.rows[index].enabled = enabled;
        Ok(())
    }

    pub fn set_value(
        &mut self,
        id: &str,
        value: Decimal,
    ) -> Result<(), KpiListError> {
        let index = self.index_of(id)?;
        self.rows[index].value = value;
        Ok(())
    }

    pub fn get(
        &self,
        id: &str,
    ) -> Option<&KpiRow> {
        self.rows.iter().find(|row| row.id == id)
    }

    pub fn rows(&self) -> &[KpiRow] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, KpiRow> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn index_of(
        &self,
        id: &str,
    ) -> Result<usize, KpiListError> {
        self.rows
            .iter()
            .position(|row| row.id == id)
            .ok_or_else(|| KpiListError::UnknownId(id.to_string()))
    }
}

impl TryFrom<Vec<KpiRow>> for KpiList {
    type Error = KpiListError;

    fn try_from(rows: Vec<KpiRow>) -> Result<Self, Self::Error> {
        let mut list = Self::new();
        for row in rows {
            list.push(row)?;
        }
        Ok(list)
    }
}

impl From<KpiList> for Vec<KpiRow> {
    fn from(list: KpiList) -> Self {
        list.rows
    }
}

impl<'a> IntoIterator for &'a KpiList {
    type Item = &'a KpiRow;
    type IntoIter = std::slice::Iter<'a, KpiRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn sample_list() -> KpiList {
        KpiList::try_from(vec![
            KpiRow::new("k1", "Checkout redesign", EffectKind::ConversionUplift, dec!(3)),
            KpiRow::new("k2", "Bundles", EffectKind::AovUplift, dec!(7.5)),
        ])
        .expect("ids are unique")
    }

    #[test]
    fn push_rejects_duplicate_id() {
        let mut list = sample_list();

        let result = list.push(KpiRow::new("k1", "Again", EffectKind::RoasUplift, dec!(1)));

        assert_eq!(result, Err(KpiListError::DuplicateId("k1".to_string())));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn try_from_rejects_duplicate_ids() {
        let result = KpiList::try_from(vec![
            KpiRow::new("a", "", EffectKind::RoasUplift, dec!(1)),
            KpiRow::new("a", "", EffectKind::RoasUplift, dec!(2)),
        ]);

        assert_eq!(result, Err(KpiListError::DuplicateId("a".to_string())));
    }

    #[test]
    fn remove_returns_row_and_preserves_order() {
        let mut list = sample_list();
        list.push(KpiRow::new("k3", "Ads", EffectKind::RoasUplift, dec!(10)))
            .expect("unique");

        let removed = list.remove("k2").expect("k2 exists");

        assert_eq!(removed.effect, EffectKind::AovUplift);
        let ids: Vec<_> = list.iter().map(|row| row.id.as_str()).collect();
        assert_eq!(ids, vec!["k1", "k3"]);
    }

    #[test]
    fn set_enabled_and_set_value_edit_in_place() {
        let mut list = sample_list();

        list.set_enabled("k1", false).expect("k1 exists");
        list.set_value("k2", dec!(10)).expect("k2 exists");

        assert!(!list.get("k1").expect("k1").enabled);
        assert_eq!(list.get("k2").expect("k2").value, dec!(10));
    }

    #[test]
    fn edits_on_unknown_id_fail() {
        let mut list = sample_list();

        assert_eq!(
            list.set_enabled("missing", true),
            Err(KpiListError::UnknownId("missing".to_string()))
        );
        assert_eq!(
            list.remove("missing"),
            Err(KpiListError::UnknownId("missing".to_string()))
        );
    }
}
