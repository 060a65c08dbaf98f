//! The calendar controller and the month matrix it renders
mod matrix;
mod render;
pub use self::matrix::{
    month_name, weekday_name, Day, DayType, MonthMatrix, OutOfTimeError, DAYS_IN_WEEK,
    WEEKS_IN_MONTH,
};
pub use self::render::ACTIVE_CLASS;
use self::matrix::add_months;
use self::render::{DayRenderers, Renderer};
use crate::dom::Element;
use crate::emitter::{Emitter, ListenerId};
use crate::options::{Options, OptionsOverride};
use time::{Date, OffsetDateTime};

/// Names of the lifecycle events a [`Calendar`] emits.  Every listener
/// receives the calendar itself.
pub mod events {
    /// Emitted by [`Calendar::init()`](super::Calendar::init) before the
    /// first update
    pub const INITIALIZE: &str = "initialize";

    /// Emitted after every rebuild of the month matrix
    pub const UPDATE: &str = "update";

    /// Emitted by [`Calendar::render()`](super::Calendar::render) after the
    /// update and before any elements are built
    pub const BEFORE_RENDER: &str = "beforeRender";

    /// Emitted once the container's content has been replaced
    pub const AFTER_RENDER: &str = "afterRender";
}

/// A month calendar that renders into a container [`Element`].
///
/// The calendar shows the month of its *reference date*, set with
/// [`Calendar::set_date()`].  Changing the date does not recompute anything
/// by itself; call [`Calendar::update()`] or [`Calendar::render()`]
/// afterwards.
#[derive(Debug)]
pub struct Calendar {
    el: Element,
    today: Date,
    date: Date,
    options: Options,
    month: Option<MonthMatrix>,
    renderers: DayRenderers,
    events: Emitter<Calendar>,
}

impl Calendar {
    /// Create a calendar rendering into `el`, with `overrides` applied on top
    /// of the default [`Options`].  Today's date is taken from the local
    /// clock.
    pub fn new(el: Element, overrides: OptionsOverride) -> Calendar {
        Calendar::with_today(el, overrides, local_today())
    }

    /// Like [`Calendar::new()`], but with an explicit date to treat as today
    pub fn with_today(el: Element, overrides: OptionsOverride, today: Date) -> Calendar {
        Calendar {
            el,
            today,
            date: today,
            options: Options::default().extend([overrides]),
            month: None,
            renderers: DayRenderers::default(),
            events: Emitter::new(),
        }
    }

    /// Reset the reference date to today, emit
    /// [`INITIALIZE`](events::INITIALIZE), and then update and render.
    ///
    /// # Errors
    ///
    /// Returns `OutOfTimeError` if today's month cannot be laid out.
    pub fn init(&mut self) -> Result<&mut Self, OutOfTimeError> {
        self.set_date(self.today);
        self.emit(events::INITIALIZE);
        self.update()?;
        self.render()
    }

    pub fn set_date(&mut self, date: Date) -> &mut Self {
        self.date = date;
        self
    }

    /// Move the reference date by `days` days
    ///
    /// # Errors
    ///
    /// Returns `OutOfTimeError`, leaving the date unchanged, if the new date
    /// would not be representable.
    pub fn shift_days(&mut self, days: i64) -> Result<&mut Self, OutOfTimeError> {
        let date = i64::from(self.date.to_julian_day())
            .checked_add(days)
            .and_then(|jd| i32::try_from(jd).ok())
            .and_then(|jd| Date::from_julian_day(jd).ok())
            .ok_or(OutOfTimeError)?;
        Ok(self.set_date(date))
    }

    /// Move the reference date by `months` months, keeping the day of the
    /// month where possible and otherwise using the last day of the target
    /// month
    ///
    /// # Errors
    ///
    /// Returns `OutOfTimeError`, leaving the date unchanged, if the new date
    /// would not be representable.
    pub fn shift_months(&mut self, months: i32) -> Result<&mut Self, OutOfTimeError> {
        let date = add_months(self.date, months).ok_or(OutOfTimeError)?;
        Ok(self.set_date(date))
    }

    pub fn jump_to_today(&mut self) -> &mut Self {
        self.set_date(self.today)
    }

    /// Rebuild the month matrix for the reference date and emit
    /// [`UPDATE`](events::UPDATE)
    ///
    /// # Errors
    ///
    /// Returns `OutOfTimeError` if the month cannot be laid out, in which case
    /// the previous matrix is kept and nothing is emitted.
    pub fn update(&mut self) -> Result<&mut Self, OutOfTimeError> {
        let month = MonthMatrix::build(self.date)?;
        tracing::debug!(date = %self.date, "rebuilt month matrix");
        self.month = Some(month);
        self.emit(events::UPDATE);
        Ok(self)
    }

    /// Update, then replace the container's content with a freshly built
    /// month element, emitting [`BEFORE_RENDER`](events::BEFORE_RENDER) and
    /// [`AFTER_RENDER`](events::AFTER_RENDER) around the build.
    ///
    /// # Errors
    ///
    /// Returns `OutOfTimeError` if the month cannot be laid out, in which case
    /// the container is left untouched.
    pub fn render(&mut self) -> Result<&mut Self, OutOfTimeError> {
        self.update()?;
        self.emit(events::BEFORE_RENDER);
        if let Some(month) = self.month.as_mut() {
            let month_el =
                Renderer::new(&self.options, &self.renderers, self.today, self.date).render(month);
            self.el.replace_children([month_el]);
        }
        tracing::debug!(date = %self.date, "rendered calendar");
        self.emit(events::AFTER_RENDER);
        Ok(self)
    }

    /// Populate day elements of the given type with `callback` instead of the
    /// day of the month.  Replaces any callback previously registered for
    /// `kind`.
    pub fn render_day<F>(&mut self, kind: DayType, callback: F) -> &mut Self
    where
        F: Fn(&mut Element, &Day) + 'static,
    {
        self.renderers.set(kind, callback);
        self
    }

    /// Populate every day element with `callback`.  If a callback is also
    /// registered for a cell's type, that one runs first.
    pub fn render_all_days<F>(&mut self, callback: F) -> &mut Self
    where
        F: Fn(&mut Element, &Day) + 'static,
    {
        self.renderers.set_all(callback);
        self
    }

    /// The reference date
    pub fn date(&self) -> Date {
        self.date
    }

    pub fn today(&self) -> Date {
        self.today
    }

    /// The month matrix from the most recent update, if any
    pub fn month(&self) -> Option<&MonthMatrix> {
        self.month.as_ref()
    }

    pub fn container(&self) -> &Element {
        &self.el
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn on<F>(&self, event: &str, listener: F) -> ListenerId
    where
        F: Fn(&Calendar) + 'static,
    {
        self.events.on(event, listener)
    }

    pub fn once<F>(&self, event: &str, listener: F) -> ListenerId
    where
        F: FnOnce(&Calendar) + 'static,
    {
        self.events.once(event, listener)
    }

    pub fn off(&self, event: &str, id: ListenerId) -> bool {
        self.events.off(event, id)
    }

    pub fn off_all(&self, event: &str) {
        self.events.off_all(event);
    }

    /// Invoke the listeners for `event` with this calendar
    pub fn emit(&self, event: &str) {
        self.events.emit(event, self);
    }

    pub fn listeners(&self, event: &str) -> Vec<ListenerId> {
        self.events.listeners(event)
    }

    pub fn has_listeners(&self, event: &str) -> bool {
        self.events.has_listeners(event)
    }
}

fn local_today() -> Date {
    match OffsetDateTime::now_local() {
        Ok(now) => now.date(),
        Err(e) => {
            tracing::warn!(error = %e, "could not determine local time zone; using UTC");
            OffsetDateTime::now_utc().date()
        }
    }
}
