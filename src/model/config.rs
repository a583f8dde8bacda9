use serde::{Deserialize, Serialize};

/// The first document of a board file: a mapping carrying the `xban_config`
/// metadata block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigDocument {
    pub xban_config: BoardConfig,
}

/// Board metadata: title, description, and one color name per column,
/// positionally parallel to the content mapping's key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub board_color: Vec<String>,
}

impl BoardConfig {
    /// A fresh config with the given title, no description, no colors.
    pub fn new(title: impl Into<String>) -> BoardConfig {
        BoardConfig {
            title: title.into(),
            description: String::new(),
            board_color: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_full_config() {
        let doc: ConfigDocument = serde_yaml_ng::from_str(
            "xban_config:\n  title: testfile\n  description: test io\n  board_color: [red, teal]\n",
        )
        .unwrap();
        assert_eq!(doc.xban_config.title, "testfile");
        assert_eq!(doc.xban_config.description, "test io");
        assert_eq!(doc.xban_config.board_color, vec!["red", "teal"]);
    }

    #[test]
    fn description_and_colors_default_when_absent() {
        let doc: ConfigDocument =
            serde_yaml_ng::from_str("xban_config:\n  title: sparse\n").unwrap();
        assert_eq!(doc.xban_config.title, "sparse");
        assert_eq!(doc.xban_config.description, "");
        assert!(doc.xban_config.board_color.is_empty());
    }

    #[test]
    fn title_is_required() {
        let result: Result<ConfigDocument, _> =
            serde_yaml_ng::from_str("xban_config:\n  description: no title\n");
        assert!(result.is_err());
    }

    #[test]
    fn extra_keys_are_ignored() {
        let doc: ConfigDocument = serde_yaml_ng::from_str(
            "xban_config:\n  title: t\n  unknown: 1\nother_top_level: true\n",
        )
        .unwrap();
        assert_eq!(doc.xban_config.title, "t");
    }

    #[test]
    fn new_config_is_empty_apart_from_title() {
        let config = BoardConfig::new("board");
        assert_eq!(config.title, "board");
        assert_eq!(config.description, "");
        assert!(config.board_color.is_empty());
    }

    #[test]
    fn serializes_keys_in_declaration_order() {
        let doc = ConfigDocument {
            xban_config: BoardConfig::new("ordered"),
        };
        let yaml = serde_yaml_ng::to_string(&doc).unwrap();
        let title = yaml.find("title:").unwrap();
        let description = yaml.find("description:").unwrap();
        let colors = yaml.find("board_color:").unwrap();
        assert!(title < description && description < colors);
    }
}
