mod template;

pub use template::{is_identifier, parse_template, parse_template_lenient, Segment, Template, TemplateError};
