//! Cab booking app
//!
//! Quotes and bookings over three service types. Distances are mocked
//! deterministically from the location names; a seeded RNG adds a surge
//! multiplier so repeated runs with the same seed reproduce prices.

use crate::app::App;
use crate::error::AppError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

pub(crate) const APP_NAME: &str = "CabApp";

/// Cab service tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceType {
    Default,
    Premium,
    Van,
}

impl ServiceType {
    /// All tiers, cheapest first by per-km price
    pub const ALL: [ServiceType; 3] = [ServiceType::Default, ServiceType::Premium, ServiceType::Van];

    /// Per-kilometre price; Default is cheapest by configuration
    #[inline]
    #[must_use]
    pub fn price_per_km(self) -> f64 {
        match self {
            ServiceType::Default => 1.0,
            ServiceType::Van => 1.8,
            ServiceType::Premium => 2.5,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceType::Default => "Default",
            ServiceType::Premium => "Premium",
            ServiceType::Van => "Van",
        }
    }
}

impl std::str::FromStr for ServiceType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Default" => Ok(ServiceType::Default),
            "Premium" => Ok(ServiceType::Premium),
            "Van" => Ok(ServiceType::Van),
            other => Err(AppError::invalid(
                APP_NAME,
                format!("unknown service type '{other}'"),
            )),
        }
    }
}

/// A quotation or booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ride {
    pub start_location: String,
    pub end_location: String,
    pub service_type: ServiceType,
    pub price: f64,
    pub distance_km: f64,
    /// Estimated minutes
    pub duration: f64,
    /// Simulated seconds; scenario-relative
    pub time_stamp: f64,
}

/// In-memory cab app
#[derive(Debug)]
pub struct CabApp {
    rng: StdRng,
    pub ride_history: Vec<Ride>,
    pub quotation_history: Vec<Ride>,
    active_ride: Option<Ride>,
}

impl Default for CabApp {
    fn default() -> Self {
        Self::with_seed(42)
    }
}

impl CabApp {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with an explicit RNG seed for reproducible prices
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            ride_history: Vec::new(),
            quotation_history: Vec::new(),
            active_ride: None,
        }
    }

    /// Mocked distance derived from the location names only
    fn mock_distance_km(start: &str, end: &str) -> f64 {
        let mix = start
            .bytes()
            .chain(end.bytes())
            .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(u32::from(b)));
        // 2.0 .. 20.0 km
        2.0 + f64::from(mix % 1800) / 100.0
    }

    fn quote(&mut self, start: &str, end: &str, service_type: ServiceType, now: f64) -> Ride {
        let distance_km = Self::mock_distance_km(start, end);
        let surge: f64 = self.rng.random_range(1.0..1.3);
        let price = (distance_km * service_type.price_per_km() * surge * 100.0).round() / 100.0;
        Ride {
            start_location: start.to_string(),
            end_location: end.to_string(),
            service_type,
            price,
            distance_km,
            duration: distance_km * 2.5,
            time_stamp: now,
        }
    }

    /// Quote one service type; recorded in the quotation history
    pub fn get_quotation(
        &mut self,
        start_location: &str,
        end_location: &str,
        service_type: ServiceType,
        ride_time: f64,
    ) -> Ride {
        let ride = self.quote(start_location, end_location, service_type, ride_time);
        self.quotation_history.push(ride.clone());
        ride
    }

    /// Quote every service type for a trip, cheapest tier first
    pub fn list_rides(
        &mut self,
        start_location: &str,
        end_location: &str,
        ride_time: f64,
    ) -> Vec<Ride> {
        ServiceType::ALL
            .iter()
            .map(|st| self.get_quotation(start_location, end_location, *st, ride_time))
            .collect()
    }

    /// Book a ride; it becomes the active booking
    pub fn order_ride(
        &mut self,
        start_location: &str,
        end_location: &str,
        service_type: ServiceType,
        ride_time: f64,
    ) -> Ride {
        let ride = self.quote(start_location, end_location, service_type, ride_time);
        debug!(
            start = start_location,
            end = end_location,
            service = service_type.as_str(),
            price = ride.price,
            "ride ordered"
        );
        self.ride_history.push(ride.clone());
        self.active_ride = Some(ride.clone());
        ride
    }

    /// Cancel the active booking
    ///
    /// # Errors
    /// `AppError::InvalidRequest` when there is no active ride.
    pub fn user_cancel_ride(&mut self) -> Result<Ride, AppError> {
        let ride = self
            .active_ride
            .take()
            .ok_or_else(|| AppError::invalid(APP_NAME, "no active ride to cancel"))?;
        debug!(service = ride.service_type.as_str(), "ride cancelled");
        Ok(ride)
    }

    /// The current active booking, if any
    #[inline]
    #[must_use]
    pub fn active_ride(&self) -> Option<&Ride> {
        self.active_ride.as_ref()
    }
}

impl App for CabApp {
    fn name(&self) -> &'static str {
        APP_NAME
    }

    fn reset(&mut self) {
        self.ride_history.clear();
        self.quotation_history.clear();
        self.active_ride = None;
    }

    fn state(&self) -> Value {
        serde_json::json!({
            "ride_history": self.ride_history,
            "quotation_history": self.quotation_history,
            "active_ride": self.active_ride,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tier_is_cheapest() {
        let mut cab = CabApp::with_seed(7);
        let rides = cab.list_rides("Downtown", "Airport", 0.0);
        assert_eq!(rides.len(), 3);

        let default = rides
            .iter()
            .find(|r| r.service_type == ServiceType::Default)
            .unwrap();
        for ride in &rides {
            if ride.service_type != ServiceType::Default {
                assert!(default.price < ride.price);
            }
        }
    }

    #[test]
    fn same_seed_reproduces_prices() {
        let mut a = CabApp::with_seed(42);
        let mut b = CabApp::with_seed(42);
        assert_eq!(
            a.get_quotation("Downtown", "Airport", ServiceType::Default, 0.0),
            b.get_quotation("Downtown", "Airport", ServiceType::Default, 0.0),
        );
    }

    #[test]
    fn order_then_cancel() {
        let mut cab = CabApp::new();
        cab.order_ride("Downtown", "Airport", ServiceType::Premium, 1.0);
        assert!(cab.active_ride().is_some());

        let cancelled = cab.user_cancel_ride().unwrap();
        assert_eq!(cancelled.service_type, ServiceType::Premium);
        assert!(cab.active_ride().is_none());
    }

    #[test]
    fn cancel_without_booking_fails() {
        let mut cab = CabApp::new();
        assert!(cab.user_cancel_ride().is_err());
    }

    #[test]
    fn quotations_are_recorded() {
        let mut cab = CabApp::new();
        cab.list_rides("Downtown", "Airport", 0.0);
        assert_eq!(cab.quotation_history.len(), 3);
        assert!(cab.ride_history.is_empty());
    }

    #[test]
    fn service_type_parses() {
        assert_eq!(
            "Premium".parse::<ServiceType>().unwrap(),
            ServiceType::Premium
        );
        assert!("Luxury".parse::<ServiceType>().is_err());
    }
}
