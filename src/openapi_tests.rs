#[cfg(test)]
mod tests {
    use crate::schemas::ApiDoc;
    use utoipa::OpenApi;
    use utoipa::openapi::{PathItemType, RefOr, schema::Schema};

    fn object_properties(name: &str) -> Vec<String> {
        let openapi = ApiDoc::openapi();
        let components = openapi.components.expect("components are generated");
        match components.schemas.get(name) {
            Some(RefOr::T(Schema::Object(obj))) => obj.properties.keys().cloned().collect(),
            _ => panic!("{name} should be an object schema"),
        }
    }

    #[test]
    fn test_openapi_schema_generation() {
        let openapi = ApiDoc::openapi();

        let components = openapi.components.as_ref().unwrap();
        assert!(components.schemas.contains_key("ErrorResponse"));
        assert!(components.schemas.contains_key("HealthResponse"));
        assert!(components.schemas.contains_key("WeeklyEarningsDto"));
        assert!(components.schemas.contains_key("UpdateEarningsRequest"));

        assert!(serde_json::to_string(&openapi).is_ok());
    }

    #[test]
    fn test_error_response_schema_structure() {
        let properties = object_properties("ErrorResponse");
        for field in ["error", "code", "success"] {
            assert!(properties.iter().any(|p| p == field), "missing {field}");
        }
    }

    #[test]
    fn test_health_response_schema_structure() {
        let properties = object_properties("HealthResponse");
        for field in ["status", "version", "storage", "storage_status"] {
            assert!(properties.iter().any(|p| p == field), "missing {field}");
        }
    }

    #[test]
    fn test_weekly_earnings_schema_structure() {
        let properties = object_properties("WeeklyEarningsDto");
        for field in [
            "week_start",
            "week_end",
            "bolt_gross",
            "uber_gross",
            "bolt_cash",
            "uber_cash",
            "total_earnings",
            "platform_fee",
            "fixed_deduction",
            "total_cash_earnings",
            "net_earnings",
        ] {
            assert!(properties.iter().any(|p| p == field), "missing {field}");
        }
    }

    #[test]
    fn test_earnings_paths_are_documented() {
        let openapi = ApiDoc::openapi();
        let paths = &openapi.paths.paths;

        let current = paths.get("/api/v1/earnings/current").expect("current week path");
        assert!(current.operations.contains_key(&PathItemType::Get));
        let patch = current
            .operations
            .get(&PathItemType::Patch)
            .expect("current week is patchable");
        assert!(patch.responses.responses.contains_key("400"));

        for path in ["/health", "/api/v1/earnings", "/api/v1/earnings/previous", "/api/v1/earnings/week-info"] {
            assert!(paths.contains_key(path), "{path} is not documented");
        }
    }

    #[test]
    fn test_all_error_responses_reference_correct_schema() {
        let openapi_json = serde_json::to_string(&ApiDoc::openapi()).unwrap();

        assert!(!openapi_json.contains("crate.schemas.ErrorResponse"));
        assert!(!openapi_json.contains("crate::schemas::ErrorResponse"));
        assert!(openapi_json.contains("ErrorResponse"));
    }
}
