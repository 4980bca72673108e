//! Deep merge of partial updates into a tree.

use serde_json::Value;

use super::Tree;


/// Build a single-branch mapping that places `value` at `keys`.
///
/// `["a", "b"]` with `1` gives `{"a": {"b": 1}}`. Returns `None` for an
/// empty key slice, which has no key to place `value` under.
pub fn build_nested(keys: &[String], value: Value) -> Option<Tree> {
    let (outer, inner) = keys.split_first()?;
    let nested = inner.iter().rev().fold(value, |acc, key| {
        let mut level = Tree::new();
        level.insert(key.clone(), acc);
        Value::Object(level)
    });
    let mut top = Tree::new();
    top.insert(outer.clone(), nested);
    Some(top)
}


/// Recursively merge `overlay` into `base` in place.
///
/// When both sides hold a mapping under the same key the two are merged;
/// in every other case the overlay value replaces the base value. Keys
/// present only in `base` are left alone.
pub fn deep_merge(base: &mut Tree, overlay: Tree) {
    for (key, incoming) in overlay {
        match incoming {
            Value::Object(nested) => match base.get_mut(&key) {
                Some(Value::Object(existing)) => deep_merge(existing, nested),
                _ => {
                    base.insert(key, Value::Object(nested));
                }
            },
            leaf => {
                base.insert(key, leaf);
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree(v: Value) -> Tree {
        match v {
            Value::Object(m) => m,
            other => panic!("not a mapping: {}", other),
        }
    }

    fn keys(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    // --- build_nested ---

    #[test]
    fn build_single_key() {
        assert_eq!(build_nested(&keys(&["a"]), json!(1)), Some(tree(json!({"a": 1}))));
    }

    #[test]
    fn build_deep_branch() {
        assert_eq!(
            build_nested(&keys(&["a", "b", "c"]), json!({"d": true})),
            Some(tree(json!({"a": {"b": {"c": {"d": true}}}})))
        );
    }

    #[test]
    fn build_with_empty_segment() {
        assert_eq!(
            build_nested(&keys(&["", "x"]), json!(null)),
            Some(tree(json!({"": {"x": null}})))
        );
    }

    #[test]
    fn build_leaf_value_is_wrapped() {
        assert_eq!(build_nested(&keys(&["k"]), json!([1, 2])), Some(tree(json!({"k": [1, 2]}))));
    }

    #[test]
    fn build_empty_keys_is_none() {
        assert_eq!(build_nested(&[], json!([1, 2])), None);
    }

    // --- deep_merge ---

    #[test]
    fn merge_adds_new_keys_and_keeps_old() {
        let mut base = tree(json!({"a": 1}));
        deep_merge(&mut base, tree(json!({"b": 2})));
        assert_eq!(Value::Object(base), json!({"a": 1, "b": 2}));
    }

    #[test]
    fn merge_nested_mappings_combine() {
        let mut base = tree(json!({"x": {"y": 1, "keep": true}}));
        deep_merge(&mut base, tree(json!({"x": {"z": 2}})));
        assert_eq!(Value::Object(base), json!({"x": {"y": 1, "keep": true, "z": 2}}));
    }

    #[test]
    fn merge_leaf_overwrites_leaf() {
        let mut base = tree(json!({"a": {"b": "old"}}));
        deep_merge(&mut base, tree(json!({"a": {"b": "new"}})));
        assert_eq!(Value::Object(base), json!({"a": {"b": "new"}}));
    }

    #[test]
    fn merge_leaf_replaces_mapping() {
        let mut base = tree(json!({"x": {"y": 1}}));
        deep_merge(&mut base, tree(json!({"x": 5})));
        assert_eq!(Value::Object(base), json!({"x": 5}));
    }

    #[test]
    fn merge_mapping_replaces_leaf() {
        let mut base = tree(json!({"x": 5}));
        deep_merge(&mut base, tree(json!({"x": {"y": 1}})));
        assert_eq!(Value::Object(base), json!({"x": {"y": 1}}));
    }

    #[test]
    fn merge_sequences_are_replaced_not_concatenated() {
        let mut base = tree(json!({"tags": ["a", "b"]}));
        deep_merge(&mut base, tree(json!({"tags": ["c"]})));
        assert_eq!(Value::Object(base), json!({"tags": ["c"]}));
    }

    #[test]
    fn merge_empty_mapping_onto_mapping_is_noop() {
        let mut base = tree(json!({"a": {"b": 1}}));
        deep_merge(&mut base, tree(json!({"a": {}})));
        assert_eq!(Value::Object(base), json!({"a": {"b": 1}}));
    }

    #[test]
    fn merge_null_overwrites() {
        let mut base = tree(json!({"a": {"b": 1}}));
        deep_merge(&mut base, tree(json!({"a": null})));
        assert_eq!(Value::Object(base), json!({"a": null}));
    }

    #[test]
    fn merge_into_empty_base() {
        let mut base = Tree::new();
        deep_merge(&mut base, tree(json!({"a": {"b": {"c": 1}}})));
        assert_eq!(Value::Object(base), json!({"a": {"b": {"c": 1}}}));
    }
}
