mod settings;

pub use settings::{
    Config, InputSettings, OutputFormat, OutputSettings, Settings, VerdictSettings,
    CHECK_FAILED_EXIT_CODE, DEFAULT_INPUT,
};
