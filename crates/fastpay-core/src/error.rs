/// Core type errors.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("amount overflow converting {0} sat to msat")]
    AmountOverflow(u64),
}
