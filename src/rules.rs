//! Orb limits and planetary dignities.
//!
//! Both lookups read immutable tables supplied by the host application
//! ([`RuleTables`]), usually deserialized once from configuration. Bodies are
//! addressed by index; an index past the end of the body table is an
//! unclassified point (house cusp, derived point, …) and gets the fallback
//! treatment instead of a table lookup.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::circle::shortest_distance;
use crate::consts::{DEGREES_PER_CIRCLE, FALLBACK_ORB_CAP};
use crate::prelude::*;
use crate::types::Sign;

/// Orb cap that never binds
const NO_ORB_CAP: f64 = DEGREES_PER_CIRCLE;

/// Aspects, in the order the base orb table lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Aspect {
    Conjunction,
    Opposition,
    Square,
    Trine,
    Sextile,
    Inconjunct,
    SemiSextile,
    SemiSquare,
    Sesquiquadrate,
    Quintile,
    BiQuintile,
}

impl Aspect {
    pub const COUNT: usize = 11;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Conjunction,
        Self::Opposition,
        Self::Square,
        Self::Trine,
        Self::Sextile,
        Self::Inconjunct,
        Self::SemiSextile,
        Self::SemiSquare,
        Self::Sesquiquadrate,
        Self::Quintile,
        Self::BiQuintile,
    ];

    /// Exact separation in degrees
    pub const fn angle(self) -> f64 {
        match self {
            Self::Conjunction => 0.0,
            Self::Opposition => 180.0,
            Self::Square => 90.0,
            Self::Trine => 120.0,
            Self::Sextile => 60.0,
            Self::Inconjunct => 150.0,
            Self::SemiSextile => 30.0,
            Self::SemiSquare => 45.0,
            Self::Sesquiquadrate => 135.0,
            Self::Quintile => 72.0,
            Self::BiQuintile => 144.0,
        }
    }

    /// Position in the base orb table
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Bodies covered by [`RuleTables::default`], in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Body {
    pub const ALL: [Self; 10] = [
        Self::Sun,
        Self::Moon,
        Self::Mercury,
        Self::Venus,
        Self::Mars,
        Self::Jupiter,
        Self::Saturn,
        Self::Uranus,
        Self::Neptune,
        Self::Pluto,
    ];

    /// Position in the default body table
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// How a body stands in a sign.
///
/// "No dignity" is `None` at the call sites, so there is no fifth variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Dignity {
    /// The body rules the sign
    Rulership,
    /// The sign is opposite one the body rules
    Fall,
    /// The body is exalted in the sign
    Exaltation,
    /// The sign is opposite the body's exaltation
    Debilitation,
}

/// Per-body entry of the rule tables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyRules {
    pub ruler: Sign,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co_ruler: Option<Sign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exaltation: Option<Sign>,
    /// Upper bound on any orb involving this body
    #[serde(default = "no_orb_cap")]
    pub orb_cap: f64,
    /// Added to any orb involving this body, after capping
    #[serde(default)]
    pub orb_add: f64,
}

const fn no_orb_cap() -> f64 {
    NO_ORB_CAP
}

impl BodyRules {
    /// A body ruling one sign, with no exaltation and no orb adjustments.
    pub const fn new(ruler: Sign) -> Self {
        Self {
            ruler,
            co_ruler: None,
            exaltation: None,
            orb_cap: NO_ORB_CAP,
            orb_add: 0.0,
        }
    }

    pub const fn with_co_ruler(mut self, sign: Sign) -> Self {
        self.co_ruler = Some(sign);
        self
    }

    pub const fn with_exaltation(mut self, sign: Sign) -> Self {
        self.exaltation = Some(sign);
        self
    }

    pub const fn with_orb(mut self, cap: f64, add: f64) -> Self {
        self.orb_cap = cap;
        self.orb_add = add;
        self
    }

    fn rules(&self, sign: Sign) -> bool {
        self.ruler == sign || self.co_ruler == Some(sign)
    }
}

/// Error type for rule tables that fail validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RulesError {
    /// The base orb table does not have one entry per aspect.
    #[error("Expected {expected} aspect orbs, found {found}")]
    AspectCount { expected: usize, found: usize },

    /// A base orb is negative or not a number.
    #[error("Invalid orb for {aspect}: {value} (must be finite and non-negative)")]
    InvalidAspectOrb { aspect: Aspect, value: f64 },

    /// A body's orb cap is negative or not a number.
    #[error("Invalid orb cap for body {body}: {value} (must be finite and non-negative)")]
    InvalidOrbCap { body: usize, value: f64 },

    /// A body's orb adjustment is not a finite number.
    #[error("Invalid orb adjustment for body {body}: {value} (must be finite)")]
    InvalidOrbAdjustment { body: usize, value: f64 },
}

/// Plain form of [`RuleTables`] as it appears in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleTablesConfig {
    pub aspect_orbs: Vec<f64>,
    pub bodies: Vec<BodyRules>,
}

/// Validated, read-only orb and dignity tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RuleTablesConfig", into = "RuleTablesConfig")]
pub struct RuleTables {
    aspect_orbs: [f64; Aspect::COUNT],
    bodies: Vec<BodyRules>,
}

impl RuleTables {
    /// Creates the tables from one base orb per aspect (in [`Aspect::ALL`]
    /// order) and one entry per classified body.
    ///
    /// # Errors
    /// Returns `RulesError` if the orb table has the wrong length or any orb
    /// value is unusable.
    pub fn new(aspect_orbs: &[f64], bodies: Vec<BodyRules>) -> Result<Self, RulesError> {
        let aspect_orbs: [f64; Aspect::COUNT] =
            aspect_orbs
                .try_into()
                .map_err(|_| RulesError::AspectCount {
                    expected: Aspect::COUNT,
                    found: aspect_orbs.len(),
                })?;

        if let Err(err) = validate(&aspect_orbs, &bodies) {
            tracing::debug!(error = %err, "rejected rule tables");
            return Err(err);
        }

        tracing::debug!(
            aspects = Aspect::COUNT,
            bodies = bodies.len(),
            "rule tables accepted"
        );
        Ok(Self {
            aspect_orbs,
            bodies,
        })
    }

    /// Base orb of an aspect before any per-body cap or adjustment
    pub const fn aspect_orb(&self, aspect: Aspect) -> f64 {
        self.aspect_orbs[aspect.index()]
    }

    /// Table entry of a classified body
    pub fn body(&self, body: usize) -> Option<&BodyRules> {
        self.bodies.get(body)
    }

    /// Number of classified bodies
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Largest allowed deviation from the exact angle of `aspect` between two bodies.
    ///
    /// The base orb is capped by both bodies' caps, then both bodies' adjustments
    /// are added. Unclassified bodies cap at [`FALLBACK_ORB_CAP`] and add nothing.
    pub fn max_orb(&self, body1: usize, body2: usize, aspect: Aspect) -> f64 {
        let orb = self
            .aspect_orb(aspect)
            .min(self.orb_cap(body1))
            .min(self.orb_cap(body2));
        orb + self.orb_add(body1) + self.orb_add(body2)
    }

    /// Dignity of a body in a sign; the first matching category wins, in the
    /// order rulership, fall, exaltation, debilitation.
    pub fn dignity(&self, body: usize, sign: Sign) -> Option<Dignity> {
        let rules = self.bodies.get(body)?;
        let opposite = sign.opposite();

        if rules.rules(sign) {
            Some(Dignity::Rulership)
        } else if rules.rules(opposite) {
            Some(Dignity::Fall)
        } else if rules.exaltation == Some(sign) {
            Some(Dignity::Exaltation)
        } else if rules.exaltation == Some(opposite) {
            Some(Dignity::Debilitation)
        } else {
            None
        }
    }

    /// Signed deviation of two positions from the exact angle of `aspect`,
    /// if it is within the orb allowed for the two bodies.
    ///
    /// Positive means the bodies are wider apart than the exact aspect.
    pub fn aspect_deviation(
        &self,
        body1: usize,
        longitude1: f64,
        body2: usize,
        longitude2: f64,
        aspect: Aspect,
    ) -> Option<f64> {
        let deviation = shortest_distance(longitude1, longitude2) - aspect.angle();
        (deviation.abs() <= self.max_orb(body1, body2, aspect)).then_some(deviation)
    }

    /// First aspect, in table order, that two positions are within orb of.
    pub fn find_aspect(
        &self,
        body1: usize,
        longitude1: f64,
        body2: usize,
        longitude2: f64,
    ) -> Option<(Aspect, f64)> {
        Aspect::ALL.iter().find_map(|&aspect| {
            self.aspect_deviation(body1, longitude1, body2, longitude2, aspect)
                .map(|deviation| (aspect, deviation))
        })
    }

    fn orb_cap(&self, body: usize) -> f64 {
        self.bodies
            .get(body)
            .map_or(FALLBACK_ORB_CAP, |rules| rules.orb_cap)
    }

    fn orb_add(&self, body: usize) -> f64 {
        self.bodies.get(body).map_or(0.0, |rules| rules.orb_add)
    }
}

fn validate(aspect_orbs: &[f64; Aspect::COUNT], bodies: &[BodyRules]) -> Result<(), RulesError> {
    for (aspect, &value) in Aspect::ALL.into_iter().zip(aspect_orbs) {
        if !value.is_finite() || value < 0.0 {
            return Err(RulesError::InvalidAspectOrb { aspect, value });
        }
    }
    for (body, rules) in bodies.iter().enumerate() {
        if !rules.orb_cap.is_finite() || rules.orb_cap < 0.0 {
            return Err(RulesError::InvalidOrbCap {
                body,
                value: rules.orb_cap,
            });
        }
        if !rules.orb_add.is_finite() {
            return Err(RulesError::InvalidOrbAdjustment {
                body,
                value: rules.orb_add,
            });
        }
    }
    Ok(())
}

const TRADITIONAL_ASPECT_ORBS: [f64; Aspect::COUNT] =
    [7.0, 7.0, 7.0, 7.0, 6.0, 3.0, 3.0, 3.0, 3.0, 2.0, 2.0];

// Modern rulers for the outer planets, traditional co-rulers kept for Mars,
// Jupiter and Saturn. The lights get an extra degree of orb.
const TRADITIONAL_BODIES: [BodyRules; 10] = [
    BodyRules::new(Sign::LEO)
        .with_exaltation(Sign::ARIES)
        .with_orb(NO_ORB_CAP, 1.0),
    BodyRules::new(Sign::CANCER)
        .with_exaltation(Sign::TAURUS)
        .with_orb(NO_ORB_CAP, 1.0),
    BodyRules::new(Sign::GEMINI)
        .with_co_ruler(Sign::VIRGO)
        .with_exaltation(Sign::VIRGO),
    BodyRules::new(Sign::TAURUS)
        .with_co_ruler(Sign::LIBRA)
        .with_exaltation(Sign::PISCES),
    BodyRules::new(Sign::ARIES)
        .with_co_ruler(Sign::SCORPIO)
        .with_exaltation(Sign::CAPRICORN),
    BodyRules::new(Sign::SAGITTARIUS)
        .with_co_ruler(Sign::PISCES)
        .with_exaltation(Sign::CANCER),
    BodyRules::new(Sign::CAPRICORN)
        .with_co_ruler(Sign::AQUARIUS)
        .with_exaltation(Sign::LIBRA),
    BodyRules::new(Sign::AQUARIUS).with_exaltation(Sign::SCORPIO),
    BodyRules::new(Sign::PISCES),
    BodyRules::new(Sign::SCORPIO),
];

impl Default for RuleTables {
    fn default() -> Self {
        Self {
            aspect_orbs: TRADITIONAL_ASPECT_ORBS,
            bodies: TRADITIONAL_BODIES.to_vec(),
        }
    }
}

impl TryFrom<RuleTablesConfig> for RuleTables {
    type Error = RulesError;

    fn try_from(config: RuleTablesConfig) -> Result<Self, Self::Error> {
        Self::new(&config.aspect_orbs, config.bodies)
    }
}

impl From<RuleTables> for RuleTablesConfig {
    fn from(tables: RuleTables) -> Self {
        Self {
            aspect_orbs: tables.aspect_orbs.to_vec(),
            bodies: tables.bodies,
        }
    }
}
