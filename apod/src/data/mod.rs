pub mod apod_response;
pub mod picture_of_the_day;
