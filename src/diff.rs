//! Change detection between the current manifest and the last snapshot.

use crate::manifest::ImageMap;

/// Filenames that must be regenerated: absent from `previous`, or present
/// with a descriptor that is not structurally equal. Entries only in
/// `previous` are ignored; stale output files are left on disk.
pub fn stale_files(current: &ImageMap, previous: &ImageMap) -> Vec<String> {
    current
        .iter()
        .filter(|(file, spec)| previous.get(*file) != Some(spec))
        .map(|(file, _)| file.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{manifest::parse_str, value::TypedValue};

    const BASE: &str = r#"{ "images": [
        { "file": "a", "class": "Button", "width": 90, "height": 28,
          "arguments": [ { "type": "String", "value": "OK" } ],
          "clientProperties": [ { "name": "uishot.default",
                                  "type": "Integer", "value": "1" } ] },
        { "file": "b", "class": "CheckBox", "width": 20, "height": 20 } ] }"#;

    #[test]
    fn identical_maps_need_no_work() {
        let current = parse_str(BASE).unwrap();
        let previous = parse_str(BASE).unwrap();
        assert!(stale_files(&current, &previous).is_empty());
    }

    #[test]
    fn empty_previous_selects_everything() {
        let current = parse_str(BASE).unwrap();
        let stale = stale_files(&current, &ImageMap::new());
        assert_eq!(stale, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn removed_entries_are_not_reported() {
        let current = parse_str(BASE).unwrap();
        let mut previous = parse_str(BASE).unwrap();
        let mut smaller = current.clone();
        smaller.remove("b");
        previous.insert("gone".into(), previous["a"].clone());
        assert!(stale_files(&smaller, &previous).is_empty());
    }

    #[test]
    fn each_field_change_selects_exactly_that_file() {
        let current = parse_str(BASE).unwrap();

        let mutations: Vec<Box<dyn Fn(&mut crate::manifest::ImageSpec)>> = vec![
            Box::new(|s| s.class = "Label".into()),
            Box::new(|s| s.width += 1),
            Box::new(|s| s.height += 1),
            Box::new(|s| s.panel_width += 1),
            Box::new(|s| s.panel_height += 1),
            Box::new(|s| s.args[0] = TypedValue::Str("Cancel".into())),
            Box::new(|s| {
                s.properties
                    .insert("uishot.default".into(), TypedValue::Int(0));
            }),
        ];

        for (i, mutate) in mutations.iter().enumerate() {
            let mut previous = current.clone();
            let spec = previous.get_mut("a").unwrap();
            mutate(spec);
            let stale = stale_files(&current, &previous);
            assert_eq!(stale, vec!["a".to_string()], "mutation {i}");
        }
    }

    #[test]
    fn value_kind_change_alone_is_a_change() {
        let current = parse_str(BASE).unwrap();
        let mut previous = current.clone();
        // Same property name, numerically identical, different declared kind.
        previous
            .get_mut("a")
            .unwrap()
            .properties
            .insert("uishot.default".into(), TypedValue::Float(1.0));
        assert_eq!(stale_files(&current, &previous), vec!["a".to_string()]);
    }
}
