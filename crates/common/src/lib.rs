//! Shared building blocks for every crate in the workspace: logging setup,
//! response envelopes, pagination math and a couple of serde helpers.

pub mod types;
pub mod utils;
pub mod pagination;
pub mod serde_ext;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn envelope_serializes_flat_shape() {
        let env = types::Envelope::ok("Tables fetched successfully", vec![1, 2]);
        let v = serde_json::to_value(&env).unwrap();
        assert_eq!(v["message"], "Tables fetched successfully");
        assert_eq!(v["status"], true);
        assert_eq!(v["data"][1], 2);
    }
}
