/*!
Complete example models, reused across the `smithy-*` crates' test suites.
*/

#[doc(hidden)]
pub mod motd;
pub use motd::MESSAGE_OF_THE_DAY_IDL;

#[doc(hidden)]
pub mod weather;
pub use weather::WEATHER_IDL;
