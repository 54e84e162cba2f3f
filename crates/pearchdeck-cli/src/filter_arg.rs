use pearchdeck_core::{Filter, FilterGroup, FilterOperator};

/// Parses `FIELD[/or][/not]=v1,!v2` into one filter group.
///
/// `/or` switches the combining operator, `/not` negates the whole group and a
/// leading `!` negates a single value.
pub fn parse_filter(arg: &str) -> Result<FilterGroup, String> {
    let (head, values) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUES, got `{}`", arg))?;
    let mut parts = head.split('/');
    let field = parts.next().unwrap_or_default().trim();
    if field.is_empty() {
        return Err(format!("missing field name in `{}`", arg));
    }

    let mut operator = FilterOperator::And;
    let mut negate = false;
    for flag in parts {
        match flag.trim().to_ascii_lowercase().as_str() {
            "or" => operator = FilterOperator::Or,
            "and" => operator = FilterOperator::And,
            "not" => negate = true,
            other => return Err(format!("unknown filter flag `{}`", other)),
        }
    }

    let filters = values
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| match v.strip_prefix('!') {
            Some(rest) => Filter::new(field, rest.trim()).negated(),
            None => Filter::new(field, v),
        })
        .collect::<Vec<_>>();
    if filters.is_empty() {
        return Err(format!("no values given for `{}`", field));
    }

    let mut group = FilterGroup::with_filters(field, filters).operator(operator);
    if negate {
        group = group.negated();
    }
    Ok(group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pearchdeck_core::compile;
    use serde_json::json;

    fn compiled(args: &[&str]) -> serde_json::Value {
        let groups: Vec<_> = args.iter().map(|a| parse_filter(a).unwrap()).collect();
        serde_json::to_value(compile(&groups)).unwrap()
    }

    #[test]
    fn single_value() {
        assert_eq!(compiled(&["Title=CEO"]), json!({"title": "CEO"}));
    }

    #[test]
    fn negated_value_and_operator() {
        assert_eq!(
            compiled(&["Location=NYC,!SF"]),
            json!({"location": {"and": ["NYC", {"not": "SF"}]}})
        );
        assert_eq!(
            compiled(&["Title/or/not=CEO, CTO"]),
            json!({"title": {"or": ["CEO", "CTO"], "not": true}})
        );
    }

    #[test]
    fn rejects_malformed() {
        assert!(parse_filter("Title").is_err());
        assert!(parse_filter("=CEO").is_err());
        assert!(parse_filter("Title/xor=CEO").is_err());
        assert!(parse_filter("Title= , ").is_err());
    }
}
