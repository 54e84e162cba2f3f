use crate::filter::{FilterGroup, FilterOperator};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use indexmap::IndexMap;

/// One operand inside a combined expression: `"v"` or `{"not": "v"}`.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterTerm {
    Value(String),
    Not(String),
}

/// Value side of a compiled field, in the search API's filter syntax.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpr {
    Value(String),
    Not(String),
    Combined {
        operator: FilterOperator,
        terms: Vec<FilterTerm>,
        negate: bool,
    },
}

impl Serialize for FilterTerm {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self {
            FilterTerm::Value(v) => s.serialize_str(v),
            FilterTerm::Not(v) => {
                let mut m = s.serialize_map(Some(1))?;
                m.serialize_entry("not", v)?;
                m.end()
            }
        }
    }
}

impl Serialize for FilterExpr {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self {
            FilterExpr::Value(v) => s.serialize_str(v),
            FilterExpr::Not(v) => {
                let mut m = s.serialize_map(Some(1))?;
                m.serialize_entry("not", v)?;
                m.end()
            }
            FilterExpr::Combined {
                operator,
                terms,
                negate,
            } => {
                let mut m = s.serialize_map(Some(if *negate { 2 } else { 1 }))?;
                m.serialize_entry(operator.as_key(), terms)?;
                if *negate {
                    m.serialize_entry("not", &true)?;
                }
                m.end()
            }
        }
    }
}

/// Lower-cased field name -> expression, in first-seen field order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct CompiledFilterSet(pub IndexMap<String, FilterExpr>);

impl CompiledFilterSet {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&FilterExpr> {
        self.0.get(field)
    }
}

/// Compile groups in order. A later group for the same field replaces the
/// earlier one's value but keeps its position; groups with no non-blank values
/// contribute nothing.
pub fn compile(groups: &[FilterGroup]) -> CompiledFilterSet {
    let mut out = IndexMap::new();
    for group in groups {
        if let Some(expr) = compile_group(group) {
            out.insert(group.field_name.to_lowercase(), expr);
        }
    }
    CompiledFilterSet(out)
}

fn compile_group(group: &FilterGroup) -> Option<FilterExpr> {
    let live: Vec<_> = group.filters.iter().filter(|f| !f.is_inert()).collect();
    match live.as_slice() {
        [] => None,
        [only] if only.negate => Some(FilterExpr::Not(only.value.clone())),
        [only] => Some(FilterExpr::Value(only.value.clone())),
        many => Some(FilterExpr::Combined {
            operator: group.operator,
            terms: many
                .iter()
                .map(|f| {
                    if f.negate {
                        FilterTerm::Not(f.value.clone())
                    } else {
                        FilterTerm::Value(f.value.clone())
                    }
                })
                .collect(),
            negate: group.negate_group,
        }),
    }
}
