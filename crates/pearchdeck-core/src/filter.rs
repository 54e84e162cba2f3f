use serde::{Deserialize, Serialize};
use ulid::Ulid;

pub type FilterId = String; // ULID string
pub type GroupId = String; // ULID string

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
    #[default]
    And,
    Or,
}

impl FilterOperator {
    pub fn as_key(&self) -> &'static str {
        match self {
            FilterOperator::And => "and",
            FilterOperator::Or => "or",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub id: FilterId,
    pub field_name: String,
    pub value: String,
    #[serde(default)]
    pub negate: bool,
}

impl Filter {
    pub fn new(field_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: Ulid::new().to_string(),
            field_name: field_name.into(),
            value: value.into(),
            negate: false,
        }
    }

    pub fn negated(mut self) -> Self {
        self.negate = true;
        self
    }

    /// Filters with a blank value never reach the compiled request.
    pub fn is_inert(&self) -> bool {
        self.value.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterGroup {
    pub id: GroupId,
    pub field_name: String,
    #[serde(default)]
    pub operator: FilterOperator,
    pub filters: Vec<Filter>,
    #[serde(default)]
    pub negate_group: bool,
}

impl FilterGroup {
    /// A fresh group starts with one empty filter labelled with the group's field.
    pub fn new(field_name: impl Into<String>) -> Self {
        let field_name = field_name.into();
        Self {
            id: Ulid::new().to_string(),
            filters: vec![Filter::new(field_name.clone(), "")],
            field_name,
            operator: FilterOperator::And,
            negate_group: false,
        }
    }

    pub fn with_filters(field_name: impl Into<String>, filters: Vec<Filter>) -> Self {
        Self {
            id: Ulid::new().to_string(),
            field_name: field_name.into(),
            operator: FilterOperator::And,
            filters,
            negate_group: false,
        }
    }

    pub fn operator(mut self, op: FilterOperator) -> Self {
        self.operator = op;
        self
    }

    pub fn negated(mut self) -> Self {
        self.negate_group = true;
        self
    }
}

/// Field-name vocabulary offered when adding groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    #[default]
    Basic,
    Advanced,
}

const BASIC_FIELDS: &[&str] = &[
    "Language",
    "Location",
    "Title",
    "Industry",
    "Degree",
    "University",
    "Company",
];

const ADVANCED_EXTRA_FIELDS: &[&str] = &["Skill", "Seniority", "Experience", "Keyword"];

impl FilterMode {
    pub fn field_names(&self) -> Vec<&'static str> {
        match self {
            FilterMode::Basic => BASIC_FIELDS.to_vec(),
            FilterMode::Advanced => BASIC_FIELDS
                .iter()
                .chain(ADVANCED_EXTRA_FIELDS.iter())
                .copied()
                .collect(),
        }
    }

    pub fn default_field(&self) -> &'static str {
        BASIC_FIELDS[0]
    }
}

/// Ordered filter groups for one search session.
///
/// Every update consumes `&self` and returns a new model; the receiver is
/// never mutated. Operations addressing an unknown id return an unchanged copy.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterModel {
    groups: Vec<FilterGroup>,
}

impl FilterModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_groups(groups: Vec<FilterGroup>) -> Self {
        // empty groups are not representable
        Self {
            groups: groups.into_iter().filter(|g| !g.filters.is_empty()).collect(),
        }
    }

    pub fn groups(&self) -> &[FilterGroup] {
        &self.groups
    }

    pub fn group(&self, id: &str) -> Option<&FilterGroup> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn add_group(&self, field_name: &str) -> Self {
        let mut groups = self.groups.clone();
        groups.push(FilterGroup::new(field_name));
        Self { groups }
    }

    pub fn remove_group(&self, group_id: &str) -> Self {
        Self {
            groups: self
                .groups
                .iter()
                .filter(|g| g.id != group_id)
                .cloned()
                .collect(),
        }
    }

    pub fn rename_group(&self, group_id: &str, field_name: &str) -> Self {
        self.map_group(group_id, |g| FilterGroup {
            field_name: field_name.to_string(),
            ..g.clone()
        })
    }

    pub fn set_operator(&self, group_id: &str, operator: FilterOperator) -> Self {
        self.map_group(group_id, |g| FilterGroup {
            operator,
            ..g.clone()
        })
    }

    pub fn toggle_group_negation(&self, group_id: &str) -> Self {
        self.map_group(group_id, |g| FilterGroup {
            negate_group: !g.negate_group,
            ..g.clone()
        })
    }

    pub fn add_filter(&self, group_id: &str) -> Self {
        self.map_group(group_id, |g| {
            let mut filters = g.filters.clone();
            filters.push(Filter::new(g.field_name.clone(), ""));
            FilterGroup {
                filters,
                ..g.clone()
            }
        })
    }

    pub fn update_filter_value(&self, group_id: &str, filter_id: &str, value: &str) -> Self {
        self.map_filter(group_id, filter_id, |f| Filter {
            value: value.to_string(),
            ..f.clone()
        })
    }

    pub fn toggle_filter_negation(&self, group_id: &str, filter_id: &str) -> Self {
        self.map_filter(group_id, filter_id, |f| Filter {
            negate: !f.negate,
            ..f.clone()
        })
    }

    /// Removing the last filter of a group removes the group itself.
    pub fn remove_filter(&self, group_id: &str, filter_id: &str) -> Self {
        let groups = self
            .groups
            .iter()
            .filter_map(|g| {
                if g.id != group_id {
                    return Some(g.clone());
                }
                let filters: Vec<Filter> = g
                    .filters
                    .iter()
                    .filter(|f| f.id != filter_id)
                    .cloned()
                    .collect();
                if filters.is_empty() {
                    None
                } else {
                    Some(FilterGroup {
                        filters,
                        ..g.clone()
                    })
                }
            })
            .collect();
        Self { groups }
    }

    fn map_group(&self, group_id: &str, f: impl Fn(&FilterGroup) -> FilterGroup) -> Self {
        Self {
            groups: self
                .groups
                .iter()
                .map(|g| if g.id == group_id { f(g) } else { g.clone() })
                .collect(),
        }
    }

    fn map_filter(&self, group_id: &str, filter_id: &str, f: impl Fn(&Filter) -> Filter) -> Self {
        self.map_group(group_id, |g| FilterGroup {
            filters: g
                .filters
                .iter()
                .map(|x| if x.id == filter_id { f(x) } else { x.clone() })
                .collect(),
            ..g.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_ids(m: &FilterModel) -> (String, String) {
        let g = &m.groups()[0];
        (g.id.clone(), g.filters[0].id.clone())
    }

    #[test]
    fn new_group_has_one_labelled_filter() {
        let m = FilterModel::new().add_group("Location");
        assert_eq!(m.groups().len(), 1);
        let g = &m.groups()[0];
        assert_eq!(g.filters.len(), 1);
        assert_eq!(g.filters[0].field_name, "Location");
        assert_eq!(g.operator, FilterOperator::And);
        assert!(!g.negate_group);
    }

    #[test]
    fn updates_do_not_touch_the_receiver() {
        let m = FilterModel::new().add_group("Title");
        let (gid, fid) = first_ids(&m);
        let m2 = m.update_filter_value(&gid, &fid, "CEO");
        assert_eq!(m.groups()[0].filters[0].value, "");
        assert_eq!(m2.groups()[0].filters[0].value, "CEO");
    }

    #[test]
    fn removing_last_filter_drops_the_group() {
        let m = FilterModel::new().add_group("Title").add_group("Company");
        let (gid, fid) = first_ids(&m);
        let m2 = m.remove_filter(&gid, &fid);
        assert_eq!(m2.groups().len(), 1);
        assert!(m2.group(&gid).is_none());
        assert_eq!(m2.groups()[0].field_name, "Company");
    }

    #[test]
    fn removing_one_of_many_filters_keeps_the_group() {
        let m = FilterModel::new().add_group("Title");
        let (gid, fid) = first_ids(&m);
        let m = m.add_filter(&gid);
        assert_eq!(m.group(&gid).map(|g| g.filters.len()), Some(2));
        let m = m.remove_filter(&gid, &fid);
        assert_eq!(m.group(&gid).map(|g| g.filters.len()), Some(1));
    }

    #[test]
    fn added_filter_takes_current_group_label() {
        let m = FilterModel::new().add_group("Title");
        let (gid, _) = first_ids(&m);
        let m = m.rename_group(&gid, "Industry").add_filter(&gid);
        let g = m.group(&gid).unwrap();
        assert_eq!(g.field_name, "Industry");
        assert_eq!(g.filters[0].field_name, "Title");
        assert_eq!(g.filters[1].field_name, "Industry");
    }

    #[test]
    fn toggles_flip_flags() {
        let m = FilterModel::new().add_group("Location");
        let (gid, fid) = first_ids(&m);
        let m = m
            .toggle_group_negation(&gid)
            .toggle_filter_negation(&gid, &fid)
            .set_operator(&gid, FilterOperator::Or);
        let g = m.group(&gid).unwrap();
        assert!(g.negate_group);
        assert!(g.filters[0].negate);
        assert_eq!(g.operator, FilterOperator::Or);
        let m = m.toggle_group_negation(&gid);
        assert!(!m.group(&gid).unwrap().negate_group);
    }

    #[test]
    fn unknown_ids_leave_model_unchanged() {
        let m = FilterModel::new().add_group("Location");
        assert_eq!(m.remove_group("nope"), m);
        assert_eq!(m.update_filter_value("nope", "nope", "x"), m);
        assert_eq!(m.remove_filter("nope", "nope"), m);
    }

    #[test]
    fn from_groups_discards_empty_groups() {
        let m = FilterModel::from_groups(vec![
            FilterGroup::with_filters("Title", vec![]),
            FilterGroup::with_filters("Company", vec![Filter::new("Company", "Acme")]),
        ]);
        assert_eq!(m.groups().len(), 1);
    }

    #[test]
    fn advanced_vocabulary_extends_basic() {
        let basic = FilterMode::Basic.field_names();
        let adv = FilterMode::Advanced.field_names();
        assert_eq!(basic.len(), 7);
        assert!(adv.starts_with(&basic));
        assert!(adv.contains(&"Skill"));
        assert_eq!(FilterMode::Basic.default_field(), "Language");
    }
}
