// Error codes implementation
// Standardized error codes for the RustCare billing engine

pub mod validation {
    pub const INVALID_INPUT: &str = "VALIDATION_1001";
}

pub mod billing {
    pub const NEGATIVE_TOTAL: &str = "BILLING_5001";
}

pub mod lookup {
    pub const NOT_FOUND: &str = "LOOKUP_6001";
}

pub mod config {
    pub const LOAD_FAILED: &str = "CONFIG_7001";
}

pub mod system {
    pub const INTERNAL: &str = "SYSTEM_9001";
}
