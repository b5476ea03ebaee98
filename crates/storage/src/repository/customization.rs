use std::collections::HashMap;

use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::dto::user::EquippedCosmetics;
use crate::error::Result;
use crate::models::CustomizationItem;

#[derive(FromRow)]
struct EquippedItemRow {
    user_id: Uuid,
    slot: String,
    item_id: String,
    name: String,
    value: String,
    rarity: String,
}

/// Read-only view over equipped profile cosmetics
pub struct CustomizationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomizationRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn equipped_for(&self, user_ids: &[Uuid]) -> Result<HashMap<Uuid, EquippedCosmetics>> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, EquippedItemRow>(
            r#"
            SELECT pc.user_id, slot.slot, ci.item_id, ci.name, ci.value, ci.rarity
            FROM profile_customizations pc
            CROSS JOIN LATERAL (
                VALUES ('background'::text, pc.background_id),
                       ('name_color', pc.name_color_id),
                       ('avatar_frame', pc.avatar_frame_id),
                       ('title', pc.title_id),
                       ('effect', pc.effect_id),
                       ('badge1', pc.badge1_id),
                       ('badge2', pc.badge2_id),
                       ('badge3', pc.badge3_id)
            ) AS slot(slot, item_id)
            INNER JOIN customization_items ci ON ci.item_id = slot.item_id
            WHERE pc.user_id = ANY($1)
            ORDER BY pc.user_id, slot.slot
            "#,
        )
        .bind(user_ids)
        .fetch_all(self.pool)
        .await?;

        let mut equipped: HashMap<Uuid, EquippedCosmetics> = HashMap::new();
        for row in rows {
            let item = CustomizationItem {
                item_id: row.item_id,
                name: row.name,
                value: row.value,
                rarity: row.rarity,
            };
            equip(equipped.entry(row.user_id).or_default(), &row.slot, item);
        }

        Ok(equipped)
    }
}

fn equip(cosmetics: &mut EquippedCosmetics, slot: &str, item: CustomizationItem) {
    match slot {
        "background" => cosmetics.background = Some(item),
        "name_color" => cosmetics.name_color = Some(item),
        "avatar_frame" => cosmetics.avatar_frame = Some(item),
        "title" => cosmetics.title = Some(item),
        "effect" => cosmetics.effect = Some(item),
        _ if slot.starts_with("badge") => cosmetics.badges.push(item),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> CustomizationItem {
        CustomizationItem {
            item_id: id.to_string(),
            name: id.to_uppercase(),
            value: "#fff".to_string(),
            rarity: "rare".to_string(),
        }
    }

    #[test]
    fn test_equip_fills_named_slots() {
        let mut cosmetics = EquippedCosmetics::default();
        equip(&mut cosmetics, "background", item("bg"));
        equip(&mut cosmetics, "title", item("t"));

        assert_eq!(cosmetics.background, Some(item("bg")));
        assert_eq!(cosmetics.title, Some(item("t")));
        assert!(cosmetics.effect.is_none());
    }

    #[test]
    fn test_badges_keep_slot_order() {
        let mut cosmetics = EquippedCosmetics::default();
        equip(&mut cosmetics, "badge1", item("a"));
        equip(&mut cosmetics, "badge2", item("b"));

        assert_eq!(cosmetics.badges, vec![item("a"), item("b")]);
    }

    #[test]
    fn test_unknown_slot_is_ignored() {
        let mut cosmetics = EquippedCosmetics::default();
        equip(&mut cosmetics, "aura", item("x"));
        assert!(cosmetics.is_empty());
    }
}
