use crate::util::first_upper;

/// Naming conventions applied when turning tables and columns into entities and fields
pub trait NameTransformer: std::fmt::Debug + Send + Sync {
    /// Whether the table-name prefix (up to the first underscore) names a module
    fn strip_prefix(&self) -> bool;

    fn table_to_entity_name(&self, table: &str) -> String {
        table_to_entity_name(table, self.strip_prefix())
    }

    fn column_to_field_name(&self, column: &str) -> String {
        column_to_field_name(column)
    }

    fn module_name(&self, table: &str) -> String {
        module_name(table, self.strip_prefix())
    }
}

/// Splits snake_case names on underscores
#[derive(Copy, Clone, Debug)]
pub struct SnakeCaseTransformer {
    pub strip_prefix: bool,
}

impl SnakeCaseTransformer {
    pub fn new(strip_prefix: bool) -> Self {
        Self { strip_prefix }
    }
}

impl NameTransformer for SnakeCaseTransformer {
    fn strip_prefix(&self) -> bool {
        self.strip_prefix
    }
}

/// `t_user_profile` becomes `UserProfile` when stripping the prefix.
/// A table without an underscore is kept whole.
pub fn table_to_entity_name(table: &str, strip_prefix: bool) -> String {
    let name = match table.split_once('_') {
        Some((_, rest)) if strip_prefix && !rest.is_empty() => rest,
        _ => table,
    };
    name.split('_').map(first_upper).collect()
}

/// `user_id` becomes `userId`
pub fn column_to_field_name(column: &str) -> String {
    let mut segments = column.split('_');
    let mut field_name = segments.next().unwrap_or_default().to_owned();
    for segment in segments {
        field_name.push_str(&first_upper(segment));
    }
    field_name
}

pub fn module_name(table: &str, strip_prefix: bool) -> String {
    if !strip_prefix {
        return String::new();
    }
    match table.split_once('_') {
        Some((prefix, _)) => prefix.to_owned(),
        None => table.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_to_entity_name() {
        assert_eq!(table_to_entity_name("t_user_profile", true), "UserProfile");
        assert_eq!(table_to_entity_name("user_profile", false), "UserProfile");
        assert_eq!(table_to_entity_name("sys_user", true), "User");
        assert_eq!(table_to_entity_name("cake", true), "Cake");
        assert_eq!(table_to_entity_name("cake", false), "Cake");
        assert_eq!(table_to_entity_name("shop__order", false), "ShopOrder");
    }

    #[test]
    fn test_column_to_field_name() {
        assert_eq!(column_to_field_name("user_id"), "userId");
        assert_eq!(column_to_field_name("id"), "id");
        assert_eq!(column_to_field_name("created_at_utc"), "createdAtUtc");
    }

    #[test]
    fn test_module_name() {
        assert_eq!(module_name("sys_user", true), "sys");
        assert_eq!(module_name("sys_user_role", true), "sys");
        assert_eq!(module_name("sys_user", false), "");
        assert_eq!(module_name("cake", true), "cake");
    }

    #[test]
    fn test_transformer() {
        let transformer = SnakeCaseTransformer::new(true);
        assert_eq!(transformer.table_to_entity_name("blog_post_tag"), "PostTag");
        assert_eq!(transformer.module_name("blog_post_tag"), "blog");
        assert_eq!(transformer.column_to_field_name("post_id"), "postId");

        let transformer = SnakeCaseTransformer::new(false);
        assert_eq!(transformer.table_to_entity_name("blog_post_tag"), "BlogPostTag");
        assert_eq!(transformer.module_name("blog_post_tag"), "");
    }
}
