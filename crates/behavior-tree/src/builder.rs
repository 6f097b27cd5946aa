//! Builder utilities for ergonomic task tree construction.
//!
//! This module provides helper functions to reduce boilerplate when building
//! task trees. Instead of writing verbose `Box::new(Sequence::new(vec![...]))`,
//! you can use shorter functions like `sequence(vec![...])`.

use crate::{AlwaysSucceed, Behavior, Idle, Inverter, Race, Repeat, Sequence, Timeout, Wait};

/// Creates a sequence node.
///
/// Shorthand for `Box::new(Sequence::new(children))`.
#[inline]
pub fn sequence<C: 'static>(children: Vec<Box<dyn Behavior<C>>>) -> Box<dyn Behavior<C>> {
    Box::new(Sequence::new(children))
}

/// Creates a race node.
///
/// Shorthand for `Box::new(Race::new(children))`.
#[inline]
pub fn race<C: 'static>(children: Vec<Box<dyn Behavior<C>>>) -> Box<dyn Behavior<C>> {
    Box::new(Race::new(children))
}

/// Creates an endless loop around `child`.
#[inline]
pub fn repeat<C: 'static>(child: Box<dyn Behavior<C>>) -> Box<dyn Behavior<C>> {
    Box::new(Repeat::new(child))
}

/// Creates an inverter node.
///
/// Shorthand for `Box::new(Inverter::new(child))`.
#[inline]
pub fn inverter<C: 'static>(child: Box<dyn Behavior<C>>) -> Box<dyn Behavior<C>> {
    Box::new(Inverter::new(child))
}

/// Creates an always-succeed node.
///
/// Shorthand for `Box::new(AlwaysSucceed::new(child))`.
#[inline]
pub fn always_succeed<C: 'static>(child: Box<dyn Behavior<C>>) -> Box<dyn Behavior<C>> {
    Box::new(AlwaysSucceed::new(child))
}

#[inline]
pub fn wait<C: 'static>(duration: f32) -> Box<dyn Behavior<C>> {
    Box::new(Wait::new(duration))
}

#[inline]
pub fn timeout<C: 'static>(duration: f32) -> Box<dyn Behavior<C>> {
    Box::new(Timeout::new(duration))
}

#[inline]
pub fn idle<C: 'static>() -> Box<dyn Behavior<C>> {
    Box::new(Idle)
}
