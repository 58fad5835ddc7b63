use serde_json::json;

use super::interface::OutputSchema;

/// Schema of `GenerationResult`. The story field is present and required only
/// when `include_story` is set; strict mode forbids optional properties.
pub fn generation_schema(include_story: bool) -> OutputSchema {
    let pair = json!({
        "type": "object",
        "properties": {
            "L1": { "type": "string" },
            "L2": { "type": "string" }
        },
        "required": ["L1", "L2"],
        "additionalProperties": false
    });

    let mut properties = serde_json::Map::new();
    let mut required = Vec::new();
    if include_story {
        properties.insert("representative_story".to_string(), json!({ "type": "string" }));
        required.push(json!("representative_story"));
    }
    properties.insert("pairs".to_string(), json!({ "type": "array", "items": pair }));
    required.push(json!("pairs"));

    OutputSchema {
        name: if include_story {
            "story_language_pairs".to_string()
        } else {
            "language_pairs".to_string()
        },
        schema: json!({
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": false
        }),
    }
}
