#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub(crate) enum Severity {
    Info,
    Error,
}

#[derive(Clone, Debug)]
pub(crate) struct Message {
    pub(crate) severity: Severity,
    pub(crate) message: String,
}
