pub mod enum_impl;
pub mod flag_groups;
