pub(crate) const VALIDATION_ENABLED: bool = cfg!(feature = "validation");
pub(crate) const DEBUG_BREAK_ENABLED: bool = cfg!(feature = "debug_break");
