pub mod asm_survey;
pub mod expenses;
pub mod placeholder;
pub mod survey_details;
