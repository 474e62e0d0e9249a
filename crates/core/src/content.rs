use crate::{
    CardClass, CardDef, CardKind, Effect, GameError, HeroPowerDef, Rarity, Selector, TargetRule,
    Trigger, TriggerPoint,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const COIN_ID: &str = "GAME_005";

/// Serialized form of a card catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentPack {
    pub cards: Vec<CardDef>,
    #[serde(default)]
    pub hero_powers: Vec<HeroPowerDef>,
}

#[derive(Debug, Clone)]
pub struct Content {
    cards: Vec<CardDef>,
    hero_powers: Vec<HeroPowerDef>,
    index: HashMap<String, usize>,
}

impl Content {
    /// Builds a catalog, rejecting duplicate ids and dangling card references.
    pub fn from_pack(pack: ContentPack) -> Result<Self, GameError> {
        let mut seen = HashMap::new();
        for (idx, card) in pack.cards.iter().enumerate() {
            if seen.insert(card.id.clone(), idx).is_some() {
                return Err(GameError::DuplicateCard(card.id.clone()));
            }
        }
        for card in &pack.cards {
            let effects = card
                .play
                .iter()
                .chain(card.triggers.iter().flat_map(|trigger| trigger.effects.iter()));
            for referenced in effects.filter_map(Effect::referenced_card) {
                if !seen.contains_key(referenced) {
                    return Err(GameError::UnknownCard(referenced.to_string()));
                }
            }
            for mode in &card.choose {
                let Some(idx) = seen.get(mode) else {
                    return Err(GameError::UnknownCard(mode.clone()));
                };
                if pack.cards[*idx].must_choose_one() {
                    return Err(GameError::NestedChoice(mode.clone()));
                }
            }
        }
        for power in &pack.hero_powers {
            for referenced in power.effects.iter().filter_map(Effect::referenced_card) {
                if !seen.contains_key(referenced) {
                    return Err(GameError::UnknownCard(referenced.to_string()));
                }
            }
        }
        Ok(Self::index_pack(pack))
    }

    fn index_pack(pack: ContentPack) -> Self {
        let index = pack
            .cards
            .iter()
            .enumerate()
            .map(|(idx, card)| (card.id.clone(), idx))
            .collect();
        Self {
            cards: pack.cards,
            hero_powers: pack.hero_powers,
            index,
        }
    }

    pub fn builtin() -> Self {
        Self::index_pack(builtin_pack())
    }

    pub fn to_pack(&self) -> ContentPack {
        ContentPack {
            cards: self.cards.clone(),
            hero_powers: self.hero_powers.clone(),
        }
    }

    pub fn cards(&self) -> &[CardDef] {
        &self.cards
    }

    pub fn card(&self, id: &str) -> Option<&CardDef> {
        self.index.get(id).map(|idx| &self.cards[*idx])
    }

    pub fn require(&self, id: &str) -> Result<&CardDef, GameError> {
        self.card(id)
            .ok_or_else(|| GameError::UnknownCard(id.to_string()))
    }

    pub fn hero_power(&self, id: &str) -> Option<&HeroPowerDef> {
        self.hero_powers.iter().find(|power| power.id == id)
    }

    pub fn hero_power_for(&self, class: CardClass) -> Option<&HeroPowerDef> {
        self.hero_powers.iter().find(|power| power.class == class)
    }

    /// Collectible cards a deck of `class` may contain.
    pub fn collectible_for(&self, class: CardClass) -> impl Iterator<Item = &CardDef> + '_ {
        self.cards.iter().filter(move |card| {
            card.collectible && (card.class == CardClass::Neutral || card.class == class)
        })
    }
}

impl CardDef {
    fn minion(id: &str, name: &str, class: CardClass, cost: i32, attack: i32, health: i32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            class,
            rarity: Rarity::Common,
            cost,
            kind: CardKind::Minion {
                attack,
                health,
                taunt: false,
                charge: false,
            },
            target: TargetRule::None,
            play: Vec::new(),
            choose: Vec::new(),
            triggers: Vec::new(),
            collectible: true,
        }
    }

    fn spell(id: &str, name: &str, class: CardClass, cost: i32) -> Self {
        Self {
            kind: CardKind::Spell,
            ..Self::minion(id, name, class, cost, 0, 0)
        }
    }

    fn taunt(mut self) -> Self {
        if let CardKind::Minion { taunt, .. } = &mut self.kind {
            *taunt = true;
        }
        self
    }

    fn charge(mut self) -> Self {
        if let CardKind::Minion { charge, .. } = &mut self.kind {
            *charge = true;
        }
        self
    }

    fn rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    fn aimed(mut self, target: TargetRule) -> Self {
        self.target = target;
        self
    }

    fn on_play(mut self, effect: Effect) -> Self {
        self.play.push(effect);
        self
    }

    fn on(mut self, point: TriggerPoint, effect: Effect) -> Self {
        self.triggers.push(Trigger {
            on: point,
            effects: vec![effect],
        });
        self
    }

    fn modes(mut self, modes: &[&str]) -> Self {
        self.choose = modes.iter().map(|mode| mode.to_string()).collect();
        self
    }

    fn token(mut self) -> Self {
        self.collectible = false;
        self
    }
}

fn damage(to: Selector, amount: i32) -> Effect {
    Effect::Damage { to, amount }
}

fn buff(to: Selector, attack: i32, health: i32) -> Effect {
    Effect::Buff {
        to,
        attack,
        health,
        taunt: false,
    }
}

fn draw(count: u32) -> Effect {
    Effect::Draw { count }
}

fn builtin_pack() -> ContentPack {
    use CardClass::{Druid, Mage, Neutral, Warlock, Warrior};
    use Selector::*;

    let cards = vec![
        CardDef::minion("CS2_231", "Wisp", Neutral, 0, 1, 1),
        CardDef::minion("CS2_168", "Murloc Raider", Neutral, 1, 2, 1).rarity(Rarity::Free),
        CardDef::minion("CS1_042", "Goldshire Footman", Neutral, 1, 1, 2)
            .taunt()
            .rarity(Rarity::Free),
        CardDef::minion("CS2_189", "Elven Archer", Neutral, 1, 1, 1)
            .aimed(TargetRule::AnyCharacter)
            .on_play(damage(Target, 1)),
        CardDef::minion("UNG_809", "Fire Fly", Neutral, 1, 1, 2).on_play(Effect::GiveCard {
            card: "UNG_809t1".to_string(),
        }),
        CardDef::minion("UNG_809t1", "Flame Elemental", Neutral, 1, 1, 2).token(),
        CardDef::minion("ICC_092", "Acherus Veteran", Neutral, 1, 2, 1)
            .aimed(TargetRule::FriendlyMinion)
            .on_play(buff(Target, 1, 0)),
        CardDef::minion("CS2_172", "Bloodfen Raptor", Neutral, 2, 3, 2).rarity(Rarity::Free),
        CardDef::minion("CS2_120", "River Crocolisk", Neutral, 2, 2, 3).rarity(Rarity::Free),
        CardDef::minion("CS2_121", "Frostwolf Grunt", Neutral, 2, 2, 2).taunt(),
        CardDef::minion("EX1_015", "Novice Engineer", Neutral, 2, 1, 1).on_play(draw(1)),
        CardDef::minion("CS2_173", "Bluegill Warrior", Neutral, 2, 2, 1).charge(),
        CardDef::minion("ICC_851", "Prince Keleseth", Neutral, 2, 2, 2)
            .rarity(Rarity::Legendary)
            .on_play(Effect::BuffDeck {
                attack: 1,
                health: 1,
            }),
        CardDef::minion("CS2_124", "Wolfrider", Neutral, 3, 3, 1).charge(),
        CardDef::minion("CS2_118", "Magma Rager", Neutral, 3, 5, 1).rarity(Rarity::Free),
        CardDef::minion("OG_113", "Darkshire Councilman", Neutral, 3, 1, 5)
            .on(TriggerPoint::AfterFriendlySummon, buff(Source, 1, 0)),
        CardDef::minion("CS2_179", "Sen'jin Shieldmasta", Neutral, 4, 3, 5).taunt(),
        CardDef::minion("CS2_182", "Chillwind Yeti", Neutral, 4, 4, 5),
        CardDef::minion("ICC_466", "Saronite Chain Gang", Neutral, 4, 2, 3)
            .taunt()
            .rarity(Rarity::Rare)
            .on_play(Effect::SummonCopy),
        CardDef::minion("ICC_075", "Despicable Dreadlord", Neutral, 5, 4, 5)
            .rarity(Rarity::Rare)
            .on(TriggerPoint::OwnTurnEnd, damage(EnemyMinions, 1)),
        CardDef::minion("CS2_200", "Boulderfist Ogre", Neutral, 6, 6, 7),
        CardDef::minion("ICC_705", "Bonemare", Neutral, 7, 5, 5)
            .aimed(TargetRule::FriendlyMinion)
            .on_play(Effect::Buff {
                to: Target,
                attack: 4,
                health: 4,
                taunt: true,
            }),
        CardDef::minion("CS2_201", "Core Hound", Neutral, 7, 9, 5),
        CardDef::spell(COIN_ID, "The Coin", Neutral, 0)
            .on_play(Effect::GainMana { amount: 1 })
            .token(),
        CardDef::minion("CS2_065", "Voidwalker", Warlock, 1, 1, 3)
            .taunt()
            .rarity(Rarity::Free),
        CardDef::spell("EX1_302", "Mortal Coil", Warlock, 1)
            .aimed(TargetRule::AnyMinion)
            .on_play(damage(Target, 1))
            .on_play(draw(1)),
        CardDef::spell("CS2_057", "Shadow Bolt", Warlock, 3)
            .aimed(TargetRule::AnyMinion)
            .on_play(damage(Target, 4)),
        CardDef::spell("CS2_061", "Drain Life", Warlock, 3)
            .aimed(TargetRule::AnyCharacter)
            .on_play(damage(Target, 2))
            .on_play(Effect::Heal {
                to: FriendlyHero,
                amount: 2,
            }),
        CardDef::spell("CS2_062", "Hellfire", Warlock, 4).on_play(damage(AllCharacters, 3)),
        CardDef::spell("CS2_024", "Frostbolt", Mage, 2)
            .aimed(TargetRule::AnyCharacter)
            .on_play(damage(Target, 3)),
        CardDef::spell("CS2_029", "Fireball", Mage, 4)
            .aimed(TargetRule::AnyCharacter)
            .on_play(damage(Target, 6)),
        CardDef::spell("CS2_023", "Arcane Intellect", Mage, 3).on_play(draw(2)),
        CardDef::spell("CS2_032", "Flamestrike", Mage, 7).on_play(damage(EnemyMinions, 4)),
        CardDef::minion("CS2_033", "Water Elemental", Mage, 4, 3, 6),
        CardDef::spell("EX1_160", "Power of the Wild", Druid, 2).modes(&["EX1_160a", "EX1_160b"]),
        CardDef::spell("EX1_160a", "Summon a Panther", Druid, 2)
            .on_play(Effect::Summon {
                card: "EX1_160t".to_string(),
            })
            .token(),
        CardDef::spell("EX1_160b", "Leader of the Pack", Druid, 2)
            .on_play(buff(FriendlyMinions, 1, 1))
            .token(),
        CardDef::minion("EX1_160t", "Panther", Druid, 2, 3, 2).token(),
        CardDef::spell("EX1_169", "Innervate", Druid, 0).on_play(Effect::GainMana { amount: 1 }),
        CardDef::spell("CS2_009", "Mark of the Wild", Druid, 2)
            .aimed(TargetRule::AnyMinion)
            .on_play(Effect::Buff {
                to: Target,
                attack: 2,
                health: 2,
                taunt: true,
            }),
        CardDef::minion("CS2_232", "Ironbark Protector", Druid, 8, 8, 8).taunt(),
        CardDef::spell("EX1_400", "Whirlwind", Warrior, 1).on_play(damage(AllMinions, 1)),
        CardDef::spell("CS2_105", "Heroic Strike", Warrior, 2)
            .on_play(Effect::GainHeroAttack { amount: 4 })
            .rarity(Rarity::Free),
        CardDef::spell("EX1_606", "Shield Block", Warrior, 3)
            .on_play(Effect::GainArmor { amount: 5 })
            .on_play(draw(1)),
    ];

    let hero_powers = vec![
        HeroPowerDef {
            id: "CS2_056".to_string(),
            name: "Life Tap".to_string(),
            class: Warlock,
            cost: 2,
            target: TargetRule::None,
            effects: vec![draw(1), damage(FriendlyHero, 2)],
        },
        HeroPowerDef {
            id: "CS2_034".to_string(),
            name: "Fireblast".to_string(),
            class: Mage,
            cost: 2,
            target: TargetRule::AnyCharacter,
            effects: vec![damage(Target, 1)],
        },
        HeroPowerDef {
            id: "CS2_102".to_string(),
            name: "Armor Up!".to_string(),
            class: Warrior,
            cost: 2,
            target: TargetRule::None,
            effects: vec![Effect::GainArmor { amount: 2 }],
        },
        HeroPowerDef {
            id: "CS2_017".to_string(),
            name: "Shapeshift".to_string(),
            class: Druid,
            cost: 2,
            target: TargetRule::None,
            effects: vec![
                Effect::GainHeroAttack { amount: 1 },
                Effect::GainArmor { amount: 1 },
            ],
        },
    ];

    ContentPack { cards, hero_powers }
}
