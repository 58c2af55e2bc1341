mod analytics_vm;
mod attempt_vm;
mod catalog_vm;
mod quiz_builder_vm;
mod time_fmt;

pub use analytics_vm::{AnalyticsVm, HistoryRowVm, ScoreBarVm};
pub use attempt_vm::{
    AttemptIntent, AttemptVm, LOW_TIME_SECS, OptionVm, PaletteEntryVm, ResultVm,
};
pub use catalog_vm::{
    ClassCardVm, QuizCardVm, StudentRowVm, map_class_cards, map_quiz_cards, map_student_rows,
};
pub use quiz_builder_vm::QuizBuilderVm;
pub use time_fmt::{format_date, format_duration};
