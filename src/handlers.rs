use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::{Map, Value};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::error::GenerationError;
use crate::generation::{GenerationRequest, GenerationResult, ReadingLevel, Variant};
use crate::state::AppState;

/// `POST /generate`
pub async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<GenerationResult>, GenerationError> {
    let Json(payload) =
        payload.map_err(|rejection| GenerationError::InvalidBody(rejection.body_text()))?;

    let request = parse_generation_request(
        &payload,
        state.generator.variant(),
        state.config.generation_config.max_pair_count,
    )?;

    let span = info_span!(
        "generate",
        request_id = %Uuid::new_v4(),
        l1 = %request.source_language,
        l2 = %request.target_language,
        n = request.pair_count,
        level = %request.reading_level,
    );

    async move {
        let result = state.generator.generate(&request).await?;
        info!("Generated {} pairs", result.pairs.len());
        Ok::<_, GenerationError>(Json(result))
    }
    .instrument(span)
    .await
}

/// Extracts and coerces the four request fields.
pub fn parse_generation_request(
    payload: &Value,
    variant: Variant,
    max_pair_count: u32,
) -> Result<GenerationRequest, GenerationError> {
    let body = payload
        .as_object()
        .ok_or_else(|| GenerationError::InvalidBody("expected a JSON object".to_string()))?;

    let source_language = language_field(body, "L1_language")?;
    let target_language = language_field(body, "L2_language")?;

    let requested = coerce_pair_count(required(body, "n")?)?;
    let pair_count = u32::try_from(requested)
        .ok()
        .filter(|n| *n <= max_pair_count)
        .ok_or(GenerationError::PairCountTooLarge {
            requested,
            max: max_pair_count,
        })?;

    let key = required(body, "reading_level")?
        .as_str()
        .ok_or_else(|| GenerationError::InvalidField {
            field: "reading_level",
            reason: "expected a string".to_string(),
        })?;
    let reading_level = ReadingLevel::from_key(key)
        .filter(|level| variant.supports(*level))
        .ok_or_else(|| GenerationError::UnknownReadingLevel {
            key: key.to_string(),
            expected: variant.reading_level_keys(),
        })?;

    Ok(GenerationRequest {
        source_language,
        target_language,
        pair_count,
        reading_level,
    })
}

fn required<'a>(body: &'a Map<String, Value>, field: &'static str) -> Result<&'a Value, GenerationError> {
    body.get(field)
        .filter(|value| !value.is_null())
        .ok_or(GenerationError::MissingField(field))
}

fn language_field(body: &Map<String, Value>, field: &'static str) -> Result<String, GenerationError> {
    let name = required(body, field)?
        .as_str()
        .map(str::trim)
        .ok_or_else(|| GenerationError::InvalidField {
            field,
            reason: "expected a string".to_string(),
        })?;
    if name.is_empty() {
        return Err(GenerationError::InvalidField {
            field,
            reason: "must not be blank".to_string(),
        });
    }
    Ok(name.to_string())
}

/// Accepts an integer, an integral float, or a string holding an integer.
fn coerce_pair_count(value: &Value) -> Result<u64, GenerationError> {
    let parsed = match value {
        Value::Number(number) if number.is_u64() => number.as_u64(),
        Value::Number(number) if number.is_i64() => None,
        Value::Number(number) => number
            .as_f64()
            .filter(|f| f.is_finite() && f.fract() == 0.0 && *f >= 1.0)
            .map(|f| f as u64),
        Value::String(text) => text.trim().parse::<u64>().ok(),
        _ => None,
    };

    parsed.filter(|n| *n >= 1).ok_or_else(|| {
        let shown = match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        GenerationError::InvalidPairCount(shown)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(payload: Value) -> Result<GenerationRequest, GenerationError> {
        parse_generation_request(&payload, Variant::Graded, 50)
    }

    #[test]
    fn parses_valid_payload() {
        let request = parse(json!({
            "L1_language": "English",
            "L2_language": "Spanish",
            "n": 5,
            "reading_level": "beginner"
        }))
        .unwrap();
        assert_eq!(request.source_language, "English");
        assert_eq!(request.target_language, "Spanish");
        assert_eq!(request.pair_count, 5);
        assert_eq!(request.reading_level, ReadingLevel::Beginner);
    }

    #[test]
    fn pair_count_accepts_strings_and_integral_floats() {
        assert_eq!(coerce_pair_count(&json!("5")).unwrap(), 5);
        assert_eq!(coerce_pair_count(&json!(" 12 ")).unwrap(), 12);
        assert_eq!(coerce_pair_count(&json!(7.0)).unwrap(), 7);
    }

    #[test]
    fn pair_count_rejects_non_integers_and_non_positive() {
        for bad in [json!("abc"), json!(2.5), json!(0), json!(-3), json!(true), json!([5])] {
            assert!(
                matches!(coerce_pair_count(&bad), Err(GenerationError::InvalidPairCount(_))),
                "accepted {}",
                bad
            );
        }
    }

    #[test]
    fn pair_count_above_maximum_is_rejected() {
        let err = parse(json!({
            "L1_language": "English",
            "L2_language": "Spanish",
            "n": 51,
            "reading_level": "beginner"
        }))
        .unwrap_err();
        assert!(matches!(err, GenerationError::PairCountTooLarge { requested: 51, max: 50 }));
    }

    #[test]
    fn pair_count_beyond_integer_range_is_too_large_not_invalid() {
        for n in [json!(u64::MAX), json!(u64::from(u32::MAX) + 1), json!("18446744073709551615")] {
            let err = parse(json!({
                "L1_language": "English",
                "L2_language": "Spanish",
                "n": n,
                "reading_level": "beginner"
            }))
            .unwrap_err();
            assert!(
                matches!(err, GenerationError::PairCountTooLarge { max: 50, .. }),
                "got {:?}",
                err
            );
        }
    }

    #[test]
    fn missing_and_null_fields_are_reported_by_name() {
        let err = parse(json!({ "L1_language": "English", "n": 5, "reading_level": "beginner" }))
            .unwrap_err();
        assert!(matches!(err, GenerationError::MissingField("L2_language")));

        let err = parse(json!({
            "L1_language": "English",
            "L2_language": "Spanish",
            "n": null,
            "reading_level": "beginner"
        }))
        .unwrap_err();
        assert!(matches!(err, GenerationError::MissingField("n")));
    }

    #[test]
    fn unknown_reading_level_lists_valid_keys() {
        let err = parse(json!({
            "L1_language": "English",
            "L2_language": "Spanish",
            "n": 5,
            "reading_level": "expert"
        }))
        .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("expert"));
        assert!(message.contains("beginner, basic, intermediate, proficient, advanced"));
    }

    #[test]
    fn reading_level_outside_variant_is_rejected() {
        let payload = json!({
            "L1_language": "English",
            "L2_language": "French",
            "n": 3,
            "reading_level": "basic"
        });
        assert!(parse_generation_request(&payload, Variant::Graded, 50).is_ok());
        assert!(matches!(
            parse_generation_request(&payload, Variant::Classic, 50),
            Err(GenerationError::UnknownReadingLevel { .. })
        ));
    }

    #[test]
    fn blank_language_and_non_object_body_fail() {
        let err = parse(json!({
            "L1_language": "  ",
            "L2_language": "Spanish",
            "n": 5,
            "reading_level": "beginner"
        }))
        .unwrap_err();
        assert!(matches!(err, GenerationError::InvalidField { field: "L1_language", .. }));

        assert!(matches!(parse(json!([1, 2])), Err(GenerationError::InvalidBody(_))));
    }
}
