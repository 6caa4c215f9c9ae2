//! Parser edge case and error handling tests.
//!
//! These tests verify parser behavior with malformed, partial, or edge case inputs.

#[cfg(test)]
mod credits_parser_edge_tests {
    use crate::openrouter::parser::{parse_response, parse_snapshot};
    use keymeter_core::EndpointSchema;
    use keymeter_fetch::FetchError;

    #[test]
    fn test_parse_empty_json_object() {
        let result = parse_response(EndpointSchema::Credits, "{}");
        assert!(matches!(result, Err(FetchError::Protocol(_))));
    }

    #[test]
    fn test_parse_empty_body() {
        let result = parse_response(EndpointSchema::Credits, "");
        assert!(matches!(result, Err(FetchError::Protocol(_))));
    }

    #[test]
    fn test_parse_data_missing_total_usage() {
        let json = r#"{"data": {"total_credits": 10}}"#;
        let result = parse_response(EndpointSchema::Credits, json);
        assert!(matches!(result, Err(FetchError::Protocol(msg)) if msg.contains("total_usage")));
    }

    #[test]
    fn test_parse_string_numbers_rejected() {
        let json = r#"{"data": {"total_credits": "10", "total_usage": "1"}}"#;
        assert!(parse_response(EndpointSchema::Credits, json).is_err());
    }

    #[test]
    fn test_parse_data_is_array() {
        let json = r#"{"data": []}"#;
        let result = parse_response(EndpointSchema::Credits, json);
        assert!(matches!(result, Err(FetchError::Protocol(_))));
    }

    #[test]
    fn test_parse_overspent_account() {
        let json = r#"{"data": {"total_credits": 5, "total_usage": 5.5}}"#;
        let snapshot = parse_snapshot(EndpointSchema::Credits, json).unwrap();
        assert_eq!(snapshot.remaining, -0.5);
    }

    #[test]
    fn test_parse_extra_fields_ignored() {
        let json = r#"{"data": {"total_credits": 1, "total_usage": 0, "currency": "USD"}, "meta": {}}"#;
        assert!(parse_snapshot(EndpointSchema::Credits, json).is_ok());
    }

    #[test]
    fn test_parse_zero_balance() {
        let json = r#"{"data": {"total_credits": 0, "total_usage": 0}}"#;
        let snapshot = parse_snapshot(EndpointSchema::Credits, json).unwrap();
        assert_eq!(snapshot.remaining, 0.0);
        assert_eq!(snapshot.limit, Some(0.0));
    }
}

#[cfg(test)]
mod key_parser_edge_tests {
    use crate::openrouter::parser::{parse_response, parse_snapshot};
    use crate::SchemaResponse;
    use keymeter_core::EndpointSchema;
    use keymeter_fetch::FetchError;

    #[test]
    fn test_parse_null_optionals() {
        let json = r#"{
            "data": {
                "label": null,
                "limit": 25,
                "limit_remaining": null,
                "usage": 5,
                "usage_daily": null,
                "usage_weekly": null,
                "usage_monthly": null,
                "is_free_tier": null,
                "limit_reset": null
            }
        }"#;
        let snapshot = parse_snapshot(EndpointSchema::KeyInfo, json).unwrap();
        assert_eq!(snapshot.remaining, 20.0);
        assert!(snapshot.label.is_none());
        assert!(snapshot.periods.is_none());
        assert!(snapshot.is_free_tier.is_none());
    }

    #[test]
    fn test_parse_unlimited_key_with_remaining() {
        let json = r#"{"data": {"limit": null, "limit_remaining": 12.5, "usage": 3}}"#;
        let snapshot = parse_snapshot(EndpointSchema::KeyInfo, json).unwrap();
        assert!(snapshot.limit.is_none());
        assert_eq!(snapshot.remaining, 12.5);
    }

    #[test]
    fn test_parse_unlimited_key_without_balance() {
        let json = r#"{"data": {"limit": null, "limit_remaining": null, "usage": 3}}"#;
        let result = parse_snapshot(EndpointSchema::KeyInfo, json);
        assert!(matches!(result, Err(FetchError::Protocol(_))));
    }

    #[test]
    fn test_parse_missing_usage() {
        let json = r#"{"data": {"limit": 10}}"#;
        assert!(matches!(
            parse_response(EndpointSchema::KeyInfo, json),
            Err(FetchError::Protocol(_))
        ));
    }

    #[test]
    fn test_schema_tag_follows_request() {
        let json = r#"{"data": {"limit": 10, "usage": 1}}"#;
        let response = parse_response(EndpointSchema::KeyInfo, json).unwrap();
        assert!(matches!(response, SchemaResponse::KeyInfo(_)));
    }

    #[test]
    fn test_credits_body_under_key_schema() {
        // A credits payload has no `usage` field.
        let json = r#"{"data": {"total_credits": 10, "total_usage": 1}}"#;
        assert!(parse_response(EndpointSchema::KeyInfo, json).is_err());
    }

    #[test]
    fn test_limit_overrides_stale_remaining() {
        let json = r#"{"data": {"limit": 100, "limit_remaining": 80, "usage": 25}}"#;
        let snapshot = parse_snapshot(EndpointSchema::KeyInfo, json).unwrap();
        assert_eq!(snapshot.remaining, 75.0);
    }
}
