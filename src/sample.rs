//! Built-in demo group, shown when the page embeds no graph data.

use chrono::{TimeZone, Utc};

use crate::components::relationship_graph::types::{
	Character, GraphData, Label, Relationship, RelationshipType,
};

const GROUP: &str = "demo";

fn label(id: &str, name: &str, color: &str) -> Label {
	Label {
		id: id.into(),
		name: name.into(),
		color: color.into(),
	}
}

fn character(id: &str, name: &str, information: &str, labels: Vec<Label>) -> Character {
	Character {
		id: id.into(),
		group_id: GROUP.into(),
		name: name.into(),
		photo: None,
		information: information.into(),
		related_links: vec![],
		labels,
		created_at: Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).single(),
		updated_at: Utc.with_ymd_and_hms(2024, 5, 12, 18, 30, 0).single(),
	}
}

fn relationship(id: &str, a: &str, b: &str, kind: RelationshipType, description: &str) -> Relationship {
	Relationship {
		id: id.into(),
		group_id: GROUP.into(),
		character1_id: a.into(),
		character2_id: b.into(),
		relationship_type: kind.label().into(),
		description: (!description.is_empty()).then(|| description.into()),
		created_at: Utc.with_ymd_and_hms(2024, 4, 2, 9, 0, 0).single(),
	}
}

pub fn sample_data() -> GraphData {
	let main = label("l-main", "主要人物", "#3b82f6");
	let family = label("l-family", "山田家", "#10b981");
	let office = label("l-office", "営業部", "#f59e0b");
	let rival = label("l-rival", "ライバル社", "#ef4444");

	let mut taro = character(
		"c-taro",
		"山田太郎",
		"営業部の若手社員。\n休日は草野球チームのキャプテン。",
		vec![main.clone(), family.clone(), office.clone()],
	);
	taro.related_links = vec!["https://example.com/profiles/taro".into()];

	let characters = vec![
		taro,
		character("c-hanako", "山田花子", "太郎の妻。", vec![main, family.clone()]),
		character("c-ichiro", "山田一郎", "太郎の父。", vec![family.clone()]),
		character("c-jiro", "山田次郎", "", vec![family]),
		character("c-sato", "佐藤部長", "営業部長。", vec![office.clone()]),
		character("c-suzuki", "鈴木", "太郎の同期。", vec![office]),
		character("c-takahashi", "高橋", "", vec![rival]),
	];

	let relationships = vec![
		relationship("r-1", "c-taro", "c-hanako", RelationshipType::Spouse, "結婚3年目"),
		relationship("r-2", "c-ichiro", "c-taro", RelationshipType::ParentChild, ""),
		relationship("r-3", "c-taro", "c-jiro", RelationshipType::Siblings, ""),
		relationship("r-4", "c-sato", "c-taro", RelationshipType::SuperiorSubordinate, ""),
		relationship("r-5", "c-taro", "c-suzuki", RelationshipType::Friend, "大学時代からの友人"),
		relationship("r-6", "c-suzuki", "c-sato", RelationshipType::Colleague, ""),
		relationship("r-7", "c-takahashi", "c-taro", RelationshipType::Adversary, "大口案件を争う"),
		relationship("r-8", "c-hanako", "c-jiro", RelationshipType::Other, "義姉弟"),
	];

	GraphData {
		characters,
		relationships,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_sample_relationships_reference_known_characters() {
		let data = sample_data();
		for rel in &data.relationships {
			assert!(data.character(&rel.character1_id).is_some(), "{}", rel.id);
			assert!(data.character(&rel.character2_id).is_some(), "{}", rel.id);
			assert!(RelationshipType::from_label(&rel.relationship_type).is_some());
		}
	}
}
