//! Month calendar grids with per-day render hooks and lifecycle events.
//!
//! A [`Calendar`] lays out the month of its reference date as a fixed grid of
//! six weeks, Sunday first, padded with the end of the previous month and the
//! start of the next, and renders that grid into a container [`Element`].
//! Hosts can take over the content of individual day cells with
//! [`Calendar::render_day()`] and [`Calendar::render_all_days()`], and can
//! observe the calendar's lifecycle through the [`events`] it emits.
//!
//! ```
//! use calgrid::{events, Calendar, DayType, Element, OptionsOverride};
//! use time::macros::date;
//!
//! let mut cal = Calendar::with_today(
//!     Element::new("div"),
//!     OptionsOverride::new(),
//!     date!(2024 - 02 - 14),
//! );
//! cal.render_day(DayType::Today, |el, day| {
//!     el.set_text_content(&format!("*{}*", day.day_of_month()));
//! });
//! cal.on(events::AFTER_RENDER, |cal| {
//!     assert_eq!(cal.container().children().len(), 1);
//! });
//! cal.init().unwrap();
//! assert!(cal.container().to_html().contains(r#"<td class="day today active">*14*</td>"#));
//! ```
pub mod calendar;
pub mod dom;
pub mod emitter;
pub mod options;
pub use crate::calendar::{
    events, month_name, weekday_name, Calendar, Day, DayType, MonthMatrix, OutOfTimeError,
};
pub use crate::dom::Element;
pub use crate::emitter::{Emitter, ListenerId};
pub use crate::options::{Names, Options, OptionsOverride};
