//! Mapping workbench logic: tree paths, rule drafts and list filtering.

use std::collections::BTreeSet;

use crate::error::ApiError;
use crate::model::mapping::{DatabaseField, MappingRule, XsdElement};
use crate::validation::{FieldErrors, Validate};

/// Full path of a schema node below `parent` (`Order/Header/Number`).
pub fn child_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

/// Splits `table.column`. Columns may contain further dots.
pub fn split_database_field(field: &str) -> Option<(&str, &str)> {
    let (table, column) = field.split_once('.')?;
    if table.is_empty() || column.is_empty() {
        return None;
    }
    Some((table, column))
}

/// A rule being edited in the mapping dialog, not yet persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingDraft {
    pub rule: MappingRule,
}

impl MappingDraft {
    /// Pre-fills a rule from the clicked schema element and database field.
    /// Returns `None` when the field is not one the backend listed.
    pub fn propose(
        client_id: i64,
        interface_id: i64,
        element: &XsdElement,
        path: &str,
        field: &str,
        db_fields: &[DatabaseField],
        existing_rules: usize,
    ) -> Option<Self> {
        let (table, column) = split_database_field(field)?;
        let declared = db_fields.iter().find(|f| f.field == field)?;
        Some(MappingDraft {
            rule: MappingRule {
                id: None,
                client_id,
                interface_id,
                name: format!("{} -> {}", path, column),
                xml_path: path.to_string(),
                database_field: column.to_string(),
                xsd_element: element.name.clone(),
                table_name: table.to_string(),
                data_type: declared.field_type.clone(),
                is_attribute: false,
                description: format!("Mapping from {} to {}", path, column),
                transformation_rule: None,
                required: false,
                default_value: None,
                priority: existing_rules as i32 + 1,
                is_active: true,
            },
        })
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        self.rule.validate()
    }

    pub fn into_rule(self) -> MappingRule {
        self.rule
    }
}

impl Validate for MappingRule {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.xml_path.trim().is_empty() {
            errors.add("xmlPath", "Please select both XML element and database field");
        }
        if self.database_field.trim().is_empty() {
            errors.add(
                "databaseField",
                "Please select both XML element and database field",
            );
        }
        errors.into_result()
    }
}

impl MappingRule {
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        [
            &self.name,
            &self.xml_path,
            &self.database_field,
            &self.description,
            &self.table_name,
        ]
        .iter()
        .any(|value| value.to_lowercase().contains(&term))
    }
}

/// Case-insensitive substring filter; an empty term keeps every rule.
pub fn filter_rules<'a>(rules: &'a [MappingRule], term: &str) -> Vec<&'a MappingRule> {
    let term = term.trim();
    if term.is_empty() {
        return rules.iter().collect();
    }
    rules.iter().filter(|rule| rule.matches(term)).collect()
}

/// Removes the rule with `id`, leaving every other entry in place.
pub fn remove_rule(rules: &mut Vec<MappingRule>, id: i64) -> Option<MappingRule> {
    let index = rules.iter().position(|rule| rule.id == Some(id))?;
    Some(rules.remove(index))
}

/// Applies the answer to a delete request. The list only changes when the
/// backend confirmed the delete; otherwise the error is returned as is.
pub fn apply_delete(
    rules: &mut Vec<MappingRule>,
    id: i64,
    result: Result<(), ApiError>,
) -> Result<Option<MappingRule>, ApiError> {
    result.map(|()| remove_rule(rules, id))
}

/// Groups fields by table, tables in order of first appearance.
pub fn group_fields_by_table(fields: &[DatabaseField]) -> Vec<(String, Vec<&DatabaseField>)> {
    let mut groups: Vec<(String, Vec<&DatabaseField>)> = Vec::new();
    for field in fields {
        let table = split_database_field(&field.field)
            .map(|(table, _)| table)
            .unwrap_or(field.table.as_str());
        match groups.iter_mut().find(|(name, _)| name == table) {
            Some((_, members)) => members.push(field),
            None => groups.push((table.to_string(), vec![field])),
        }
    }
    groups
}

/// Column part of a `table.column` field, for display.
pub fn column_label(field: &DatabaseField) -> &str {
    split_database_field(&field.field)
        .map(|(_, column)| column)
        .unwrap_or(field.field.as_str())
}

/// Keeps elements whose name matches `term`, with their whole subtree, and
/// the ancestors of any match.
pub fn filter_elements(elements: &[XsdElement], term: &str) -> Vec<XsdElement> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return elements.to_vec();
    }
    prune(elements, &term)
}

fn prune(elements: &[XsdElement], term: &str) -> Vec<XsdElement> {
    elements
        .iter()
        .filter_map(|element| {
            if element.name.to_lowercase().contains(term) {
                return Some(element.clone());
            }
            let children = prune(&element.elements, term);
            (!children.is_empty()).then(|| XsdElement {
                elements: children,
                ..element.clone()
            })
        })
        .collect()
}

/// Paths of every node that has children, for "expand all".
pub fn expandable_paths(elements: &[XsdElement]) -> BTreeSet<String> {
    let mut paths = BTreeSet::new();
    collect_paths(elements, "", &mut paths);
    paths
}

fn collect_paths(elements: &[XsdElement], parent: &str, paths: &mut BTreeSet<String>) {
    for element in elements {
        if element.has_children() {
            let path = child_path(parent, &element.name);
            collect_paths(&element.elements, &path, paths);
            paths.insert(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(id: i64, name: &str, table: &str) -> MappingRule {
        MappingRule {
            id: Some(id),
            client_id: 1,
            interface_id: 2,
            name: name.to_string(),
            xml_path: format!("Order/{}", name),
            database_field: name.to_lowercase(),
            xsd_element: name.to_string(),
            table_name: table.to_string(),
            data_type: "VARCHAR".into(),
            is_attribute: false,
            description: String::new(),
            transformation_rule: None,
            required: false,
            default_value: None,
            priority: id as i32,
            is_active: true,
        }
    }

    fn element(name: &str, children: Vec<XsdElement>) -> XsdElement {
        XsdElement {
            name: name.to_string(),
            elements: children,
            ..XsdElement::default()
        }
    }

    fn field(field: &str, ty: &str) -> DatabaseField {
        DatabaseField {
            field: field.to_string(),
            field_type: ty.to_string(),
            table: String::new(),
            required: false,
            description: None,
        }
    }

    #[test]
    fn search_is_case_insensitive_over_all_fields() {
        let mut rules = vec![
            rule(1, "OrderNumber", "asn_headers"),
            rule(2, "Quantity", "asn_lines"),
            rule(3, "Carrier", "shipments"),
        ];
        rules[2].description = "Mapping for SCAC code".into();

        let names =
            |hits: Vec<&MappingRule>| hits.iter().map(|r| r.id.unwrap()).collect::<Vec<_>>();
        assert_eq!(names(filter_rules(&rules, "ORDERNUMBER")), vec![1]);
        assert_eq!(names(filter_rules(&rules, "asn_")), vec![1, 2]);
        assert_eq!(names(filter_rules(&rules, "scac")), vec![3]);
        assert_eq!(names(filter_rules(&rules, "order/quant")), vec![2]);
        assert_eq!(filter_rules(&rules, "").len(), 3);
        assert_eq!(filter_rules(&rules, "   ").len(), 3);
        assert!(filter_rules(&rules, "nothing").is_empty());
    }

    #[test]
    fn remove_takes_exactly_one_entry() {
        let mut rules = vec![rule(1, "A", "t"), rule(2, "B", "t"), rule(3, "C", "t")];
        let removed = remove_rule(&mut rules, 2).unwrap();
        assert_eq!(removed.name, "B");
        assert_eq!(rules.iter().map(|r| r.id).collect::<Vec<_>>(), vec![Some(1), Some(3)]);
        assert!(remove_rule(&mut rules, 42).is_none());
        assert_eq!(rules.len(), 2);
    }

    #[test]
    fn rejected_delete_leaves_rules_untouched() {
        let mut rules = vec![rule(1, "A", "t"), rule(2, "B", "t")];
        let before = rules.clone();

        let result = apply_delete(&mut rules, 2, Err(ApiError::Network("offline".into())));
        assert_eq!(result, Err(ApiError::Network("offline".into())));
        assert_eq!(rules, before);

        let result = apply_delete(&mut rules, 1, Err(ApiError::Forbidden));
        assert!(result.unwrap_err().is_session_invalid());
        assert_eq!(rules, before);
    }

    #[test]
    fn confirmed_delete_removes_only_that_rule() {
        let mut rules = vec![rule(1, "A", "t"), rule(2, "B", "t"), rule(3, "C", "u")];

        let removed = apply_delete(&mut rules, 2, Ok(())).unwrap();
        assert_eq!(removed.map(|r| r.name), Some("B".to_string()));
        let ids: Vec<_> = rules.iter().filter_map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn propose_fills_generated_defaults() {
        let fields = vec![field("asn_headers.order_number", "VARCHAR")];
        let node = element("Number", vec![]);
        let draft = MappingDraft::propose(
            7,
            9,
            &node,
            "Order/Header/Number",
            "asn_headers.order_number",
            &fields,
            4,
        )
        .unwrap();

        let rule = draft.rule;
        assert_eq!(rule.name, "Order/Header/Number -> order_number");
        assert_eq!(rule.description, "Mapping from Order/Header/Number to order_number");
        assert_eq!(rule.table_name, "asn_headers");
        assert_eq!(rule.database_field, "order_number");
        assert_eq!(rule.data_type, "VARCHAR");
        assert_eq!(rule.priority, 5);
        assert_eq!((rule.client_id, rule.interface_id), (7, 9));
        assert!(rule.is_active);
    }

    #[test]
    fn propose_needs_a_listed_field() {
        let node = element("Number", vec![]);
        assert!(MappingDraft::propose(1, 1, &node, "Number", "unknown.col", &[], 0).is_none());
        assert!(MappingDraft::propose(1, 1, &node, "Number", "nocolumn", &[], 0).is_none());
    }

    #[test]
    fn draft_requires_path_and_field() {
        let mut draft = MappingDraft { rule: rule(1, "A", "t") };
        assert!(draft.validate().is_ok());
        draft.rule.xml_path.clear();
        assert!(draft.validate().unwrap_err().has("xmlPath"));
    }

    #[test]
    fn fields_grouped_in_first_seen_order() {
        let fields = vec![
            field("lines.qty", "INT"),
            field("headers.id", "INT"),
            field("lines.sku", "VARCHAR"),
        ];
        let groups = group_fields_by_table(&fields);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "lines");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(column_label(groups[0].1[1]), "sku");
    }

    #[test]
    fn element_search_keeps_ancestors() {
        let tree = vec![element(
            "Order",
            vec![
                element("Header", vec![element("Number", vec![])]),
                element("Lines", vec![element("Line", vec![])]),
            ],
        )];
        let hits = filter_elements(&tree, "numb");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].elements.len(), 1);
        assert_eq!(hits[0].elements[0].name, "Header");

        let paths = expandable_paths(&tree);
        assert!(paths.contains("Order"));
        assert!(paths.contains("Order/Header"));
        assert!(paths.contains("Order/Lines"));
        assert!(!paths.contains("Order/Header/Number"));
    }
}
