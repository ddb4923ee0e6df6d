// Post-load validation hook
pub trait ConfigValidator {
    fn validate(&self) -> crate::error::Result<()>;
}
