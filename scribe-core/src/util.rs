use convert_case::{Case, Casing};

pub fn separated_by<T, F>(
    out: &mut String,
    values: impl IntoIterator<Item = T>,
    mut f: F,
    separator: &str,
) where
    F: FnMut(&mut String, T),
{
    let mut len = out.len();
    for v in values {
        if out.len() > len {
            out.push_str(separator);
        }
        len = out.len();
        f(out, v);
    }
}

/// Fallible version of [`separated_by`], stops at the first error.
pub fn try_separated_by<T, F, E>(
    out: &mut String,
    values: impl IntoIterator<Item = T>,
    mut f: F,
    separator: &str,
) -> Result<(), E>
where
    F: FnMut(&mut String, T) -> Result<(), E>,
{
    let mut len = out.len();
    for v in values {
        if out.len() > len {
            out.push_str(separator);
        }
        len = out.len();
        f(out, v)?;
    }
    Ok(())
}

/// English plural of a type name, used to derive default table names.
pub fn pluralize(name: &str) -> String {
    let lower = name.to_ascii_lowercase();
    let mut result = String::with_capacity(name.len() + 2);
    if let Some(stem) = name.strip_suffix(['y', 'Y'])
        && !stem.is_empty()
        && !stem.ends_with(['a', 'e', 'i', 'o', 'u', 'A', 'E', 'I', 'O', 'U'])
    {
        result.push_str(stem);
        result.push_str("ies");
    } else if ["s", "x", "z", "ch", "sh"]
        .iter()
        .any(|suffix| lower.ends_with(suffix))
    {
        result.push_str(name);
        result.push_str("es");
    } else {
        result.push_str(name);
        result.push('s');
    }
    result
}

/// Names a member may carry when it references `target` by convention: `category_id` or `CategoryId`.
pub fn foreign_key_convention(target: &str, member: &str) -> bool {
    let snake = format!("{}_id", target.to_case(Case::Snake));
    member == snake || member.eq_ignore_ascii_case(&format!("{}Id", target))
}

/// Strip the module path from a `std::any::type_name` output.
pub fn short_type_name(name: &'static str) -> &'static str {
    let generic = name.find('<').unwrap_or(name.len());
    let start = name[..generic].rfind("::").map(|i| i + 2).unwrap_or(0);
    &name[start..]
}

#[macro_export]
macro_rules! possibly_parenthesized {
    ($out:ident, $cond:expr, $v:expr) => {
        if $cond {
            $out.push('(');
            $v;
            $out.push(')');
        } else {
            $v;
        }
    };
}

#[macro_export]
macro_rules! write_integer {
    ($out:ident, $value:expr) => {{
        let mut buffer = $crate::itoa::Buffer::new();
        $out.push_str(buffer.format($value));
    }};
}

/// Shorten long statements for log records.
#[macro_export]
macro_rules! truncate_long {
    ($query:expr) => {{
        let query: &str = &$query;
        let end = query
            .char_indices()
            .nth(497)
            .map(|(i, _)| i)
            .unwrap_or(query.len());
        format!(
            "{}{}",
            query[..end].trim_end(),
            if end < query.len() { "..." } else { "" }
        )
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pluralize_names() {
        assert_eq!(pluralize("Product"), "Products");
        assert_eq!(pluralize("Category"), "Categories");
        assert_eq!(pluralize("Day"), "Days");
        assert_eq!(pluralize("Box"), "Boxes");
        assert_eq!(pluralize("Address"), "Addresses");
        assert_eq!(pluralize("Match"), "Matches");
        assert_eq!(pluralize("Y"), "Ys");
    }

    #[test]
    fn foreign_key_names() {
        assert!(foreign_key_convention("Category", "category_id"));
        assert!(foreign_key_convention("Category", "CategoryId"));
        assert!(foreign_key_convention("OrderLine", "order_line_id"));
        assert!(foreign_key_convention("OrderLine", "orderlineid"));
        assert!(!foreign_key_convention("Category", "category"));
        assert!(!foreign_key_convention("Category", "product_id"));
    }

    #[test]
    fn short_names() {
        assert_eq!(short_type_name("scribe_sqlite::SqliteSqlWriter"), "SqliteSqlWriter");
        assert_eq!(short_type_name("Plain"), "Plain");
        assert_eq!(short_type_name("a::Wrapper<b::Inner>"), "Wrapper<b::Inner>");
    }

    #[test]
    fn separated() {
        let mut out = String::from("select ");
        separated_by(&mut out, ["a", "", "b"], |out, v| out.push_str(v), ", ");
        assert_eq!(out, "select a, b");
    }

    #[test]
    fn truncate() {
        let long = "x".repeat(600);
        assert_eq!(truncate_long!(long).len(), 500);
        assert_eq!(truncate_long!("select 1"), "select 1");
    }
}
