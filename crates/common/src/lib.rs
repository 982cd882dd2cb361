//! Shared building blocks used by every crate in the workspace:
//! health/response types, pagination, logging setup and metrics.

pub mod types;
pub mod utils;
pub mod pagination;
pub mod metrics;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn action_result_serializes_message_and_data() {
        let r = types::ActionResult::new("Saved", serde_json::json!({"id": 1}));
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["message"], "Saved");
        assert_eq!(v["data"]["id"], 1);
    }
}
