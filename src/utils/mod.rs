mod maths_utils;
mod perf;
mod time_utils;
mod vec_utils;

pub use time_utils::{
    AppInstant, TimeUtils, business_days, date_to_epoch_ms, epoch_ms_to_date_string,
    is_business_day,
};
pub use vec_utils::fill_forward_mut;

pub(crate) use maths_utils::{clip, mean_and_sample_stddev, min_max, round_to_places};
