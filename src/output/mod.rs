pub mod formatter;

pub use formatter::{
    format_amount, format_quote_detail, format_quote_line, format_rates, format_user_line,
    format_user_list, should_use_colors,
};
