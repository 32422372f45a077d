//! Experience, level-ups and the upgrade catalog
//!
//! Leveling pauses the simulation: once XP crosses the threshold the run
//! sits in [`LevelState::ChoosingUpgrade`] until one of the three offered
//! upgrades is picked.

use rand::Rng;
use rand::seq::index;
use serde::{Deserialize, Serialize};

use super::entities::Player;
use super::weapon::Weapon;
use crate::tuning::ProgressionTuning;

/// Number of upgrades offered per level-up
pub const CHOICES_PER_LEVEL: usize = 3;

/// Upgrade catalog ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UpgradeId {
    FireRateUp,
    DamageUp,
    MoveSpeedUp,
    BulletSpeedUp,
    MaxHpUp,
    MultiShot,
}

impl UpgradeId {
    /// Full catalog, in offer-sampling order
    pub const ALL: [UpgradeId; 6] = [
        UpgradeId::FireRateUp,
        UpgradeId::DamageUp,
        UpgradeId::MoveSpeedUp,
        UpgradeId::BulletSpeedUp,
        UpgradeId::MaxHpUp,
        UpgradeId::MultiShot,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            UpgradeId::FireRateUp => "Rapid Fire",
            UpgradeId::DamageUp => "Harder Hits",
            UpgradeId::MoveSpeedUp => "Light Feet",
            UpgradeId::BulletSpeedUp => "Faster Bullets",
            UpgradeId::MaxHpUp => "Tougher Body",
            UpgradeId::MultiShot => "Multi-Shot",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            UpgradeId::FireRateUp => "+20% fire rate",
            UpgradeId::DamageUp => "+1 bullet damage",
            UpgradeId::MoveSpeedUp => "+12% move speed",
            UpgradeId::BulletSpeedUp => "+15% bullet speed",
            UpgradeId::MaxHpUp => "+1 max HP (and heal +1)",
            UpgradeId::MultiShot => "+2 bullets (spread)",
        }
    }

    pub fn upgrade(&self) -> Upgrade {
        Upgrade {
            id: *self,
            title: self.title(),
            description: self.description(),
        }
    }

    /// Apply this upgrade's effect. Effects stack across repeats.
    pub fn apply(&self, weapon: &mut Weapon, player: &mut Player) {
        match self {
            UpgradeId::FireRateUp => weapon.fire_rate *= 1.2,
            UpgradeId::DamageUp => weapon.bullet_damage += 1,
            UpgradeId::MoveSpeedUp => player.speed *= 1.12,
            UpgradeId::BulletSpeedUp => weapon.bullet_speed *= 1.15,
            UpgradeId::MaxHpUp => player.grow_max_hp(1),
            UpgradeId::MultiShot => weapon.add_multishot(),
        }
    }
}

/// Immutable catalog entry shown to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Upgrade {
    pub id: UpgradeId,
    pub title: &'static str,
    pub description: &'static str,
}

/// Draw three distinct upgrades from the catalog
pub fn sample_choices<R: Rng + ?Sized>(rng: &mut R) -> [UpgradeId; CHOICES_PER_LEVEL] {
    let picks = index::sample(rng, UpgradeId::ALL.len(), CHOICES_PER_LEVEL);
    [
        UpgradeId::ALL[picks.index(0)],
        UpgradeId::ALL[picks.index(1)],
        UpgradeId::ALL[picks.index(2)],
    ]
}

/// XP threshold for the level after one requiring `current`
pub fn next_threshold(current: u32, growth: f64) -> u32 {
    (current as f64 * growth).ceil() as u32
}

/// Whether the simulation is running or frozen on an upgrade pick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelState {
    Active,
    ChoosingUpgrade {
        choices: [UpgradeId; CHOICES_PER_LEVEL],
    },
}

/// Level, XP and the level-up sub-state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Progression {
    pub level: u32,
    pub xp: u32,
    pub xp_to_next: u32,
    pub state: LevelState,
    growth: f64,
}

impl Progression {
    pub fn new(tuning: &ProgressionTuning) -> Self {
        Self {
            level: 1,
            xp: 0,
            xp_to_next: tuning.xp_to_first_level,
            state: LevelState::Active,
            growth: tuning.xp_growth,
        }
    }

    pub fn is_choosing(&self) -> bool {
        matches!(self.state, LevelState::ChoosingUpgrade { .. })
    }

    pub fn choices(&self) -> Option<&[UpgradeId; CHOICES_PER_LEVEL]> {
        match &self.state {
            LevelState::ChoosingUpgrade { choices } => Some(choices),
            LevelState::Active => None,
        }
    }

    /// Add XP. Returns the offered choices if this crossed the threshold.
    ///
    /// While a choice is already pending, XP still accrues but no second
    /// level-up is queued; [`Progression::check_level_up`] picks it up once
    /// the pending choice is resolved.
    pub fn gain_xp<R: Rng + ?Sized>(
        &mut self,
        amount: u32,
        rng: &mut R,
    ) -> Option<[UpgradeId; CHOICES_PER_LEVEL]> {
        self.xp += amount;
        self.check_level_up(rng)
    }

    /// Level up if XP has reached the threshold and no choice is pending
    pub fn check_level_up<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Option<[UpgradeId; CHOICES_PER_LEVEL]> {
        if self.is_choosing() || self.xp < self.xp_to_next {
            return None;
        }

        self.level += 1;
        self.xp = 0;
        self.xp_to_next = next_threshold(self.xp_to_next, self.growth);
        let choices = sample_choices(rng);
        self.state = LevelState::ChoosingUpgrade { choices };
        log::info!("Level up -> {} (next at {} xp)", self.level, self.xp_to_next);
        Some(choices)
    }

    /// Resolve a pending choice by index (0-2). Returns the chosen upgrade.
    pub fn choose(&mut self, index: usize) -> Option<UpgradeId> {
        let picked = *self.choices()?.get(index)?;
        self.state = LevelState::Active;
        Some(picked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::Arena;
    use crate::tuning::{PlayerTuning, WeaponTuning};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn progression() -> Progression {
        Progression::new(&ProgressionTuning::default())
    }

    #[test]
    fn test_threshold_growth() {
        assert_eq!(next_threshold(5, 1.35), 7);
        assert_eq!(next_threshold(7, 1.35), 10);
        assert_eq!(next_threshold(10, 1.35), 14);
    }

    #[test]
    fn test_five_single_xp_awards_level_once() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut p = progression();
        for _ in 0..4 {
            assert!(p.gain_xp(1, &mut rng).is_none());
        }
        let choices = p.gain_xp(1, &mut rng).expect("level up on fifth xp");
        assert_eq!(p.level, 2);
        assert_eq!(p.xp, 0);
        assert_eq!(p.xp_to_next, 7);
        assert_eq!(p.choices(), Some(&choices));
    }

    #[test]
    fn test_no_second_level_while_choosing() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut p = progression();
        assert!(p.gain_xp(10, &mut rng).is_some());
        assert!(p.gain_xp(10, &mut rng).is_none());
        assert_eq!(p.level, 2);
        assert_eq!(p.xp, 10);

        assert!(p.choose(0).is_some());
        assert!(!p.is_choosing());
        // Banked XP levels up as soon as the pick clears
        assert!(p.check_level_up(&mut rng).is_some());
        assert_eq!(p.level, 3);
        assert_eq!(p.xp, 0);
        assert_eq!(p.xp_to_next, 10);
        assert!(p.is_choosing());
    }

    #[test]
    fn test_check_level_up_below_threshold() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut p = progression();
        p.xp = 4;
        assert!(p.check_level_up(&mut rng).is_none());
        assert_eq!(p.level, 1);
        assert!(!p.is_choosing());
    }

    #[test]
    fn test_choose_without_pending_choice() {
        let mut p = progression();
        assert_eq!(p.choose(0), None);
    }

    #[test]
    fn test_choose_picks_by_index() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut p = progression();
        let choices = p.gain_xp(5, &mut rng).unwrap();
        assert_eq!(p.choose(2), Some(choices[2]));
        assert_eq!(p.state, LevelState::Active);
    }

    #[test]
    fn test_catalog_has_six_distinct_entries() {
        let all = UpgradeId::ALL.map(|id| id.upgrade());
        assert_eq!(all.len(), 6);
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn test_upgrade_effects_stack() {
        let arena = Arena::new(800.0, 600.0);
        let mut player = Player::new(&arena, &PlayerTuning::default());
        let mut weapon = Weapon::new(&WeaponTuning::default());

        UpgradeId::FireRateUp.apply(&mut weapon, &mut player);
        UpgradeId::FireRateUp.apply(&mut weapon, &mut player);
        assert!((weapon.fire_rate - 14.4).abs() < 1e-4);

        UpgradeId::DamageUp.apply(&mut weapon, &mut player);
        assert_eq!(weapon.bullet_damage, 2);

        UpgradeId::MoveSpeedUp.apply(&mut weapon, &mut player);
        assert!((player.speed - 291.2).abs() < 1e-3);

        UpgradeId::BulletSpeedUp.apply(&mut weapon, &mut player);
        assert!((weapon.bullet_speed - 747.5).abs() < 1e-3);

        for _ in 0..4 {
            UpgradeId::MultiShot.apply(&mut weapon, &mut player);
        }
        assert_eq!(weapon.multi_shot, 2);
    }

    #[test]
    fn test_upgrade_ids_serialize_camel_case() {
        let json = serde_json::to_string(&UpgradeId::BulletSpeedUp).unwrap();
        assert_eq!(json, "\"bulletSpeedUp\"");
    }

    proptest! {
        #[test]
        fn prop_samples_are_distinct(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let c = sample_choices(&mut rng);
            prop_assert!(c[0] != c[1] && c[1] != c[2] && c[0] != c[2]);
        }

        #[test]
        fn prop_max_hp_up_never_overheals(n in 0u32..20, start_hp in 1u32..=5) {
            let arena = Arena::new(800.0, 600.0);
            let mut player = Player::new(&arena, &PlayerTuning::default());
            let mut weapon = Weapon::new(&WeaponTuning::default());
            player.hp = start_hp;
            let base_max = player.max_hp;
            for _ in 0..n {
                UpgradeId::MaxHpUp.apply(&mut weapon, &mut player);
                prop_assert!(player.hp <= player.max_hp);
            }
            prop_assert_eq!(player.max_hp, base_max + n);
        }
    }
}
