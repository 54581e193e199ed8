pub(crate) mod date;
pub(crate) mod timezone;

pub(crate) use date::parse_date;
pub(crate) use timezone::{Timezone, format_timestamp, parse_server_timestamp};
