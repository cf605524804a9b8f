#![forbid(unsafe_code)]

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use glint_core::{load_embed_config_from, EmbedConfig};

    // ---- Golden fixtures (JSON contracts) ----
    const EMBED_BUILTIN_JSON: &str = include_str!("../fixtures/embed_builtin.json");
    const EMBED_UNKNOWN_FIELD_JSON: &str = include_str!("../fixtures/embed_unknown_field.json");
    const EMBED_BAD_SIZE_JSON: &str = include_str!("../fixtures/embed_bad_size.json");

    fn write_temp_fixture(name: &str, contents: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_millis();
        p.push(format!("glint_contract_tests_{name}_{ts}.json"));
        fs::write(&p, contents).expect("write fixture");
        p
    }

    #[test]
    fn golden_embed_builtin_json_deserializes() {
        let path = write_temp_fixture("embed_builtin", EMBED_BUILTIN_JSON);

        let config = load_embed_config_from(&path).expect("embed_builtin.json should parse");
        assert_eq!((config.width, config.height), (640, 480));
        assert_eq!(config.cube_color, [0.8, 0.2, 0.2]);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn golden_unknown_field_is_rejected() {
        let path = write_temp_fixture("embed_unknown_field", EMBED_UNKNOWN_FIELD_JSON);

        let err = load_embed_config_from(&path)
            .expect_err("embed_unknown_field.json must fail (typo'd key)");

        // Keep this stable but not overly strict.
        assert!(
            err.to_string().to_lowercase().contains("unknown field"),
            "expected error to mention the unknown field, got: {err}"
        );

        let _ = fs::remove_file(path);
    }

    #[test]
    fn golden_non_positive_size_is_rejected() {
        let path = write_temp_fixture("embed_bad_size", EMBED_BAD_SIZE_JSON);

        let err =
            load_embed_config_from(&path).expect_err("embed_bad_size.json must fail (zero width)");

        assert!(
            err.to_string().to_lowercase().contains("must be positive"),
            "expected error to mention the size invariant, got: {err}"
        );

        let _ = fs::remove_file(path);
    }

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let path = write_temp_fixture("embed_partial", r#"{ "width": 512 }"#);

        let config = load_embed_config_from(&path).expect("partial config should parse");
        let defaults = EmbedConfig::default();
        assert_eq!(config.width, 512);
        assert_eq!(config.height, defaults.height);
        assert_eq!(config.spin_degrees, defaults.spin_degrees);

        let _ = fs::remove_file(path);
    }
}

#[cfg(test)]
mod interaction;
