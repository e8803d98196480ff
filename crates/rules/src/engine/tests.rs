use super::*;
use crate::config::MemoCatalog;

const YEAR: i32 = 2026;

fn vehicle(current: &str, last: &str, year: &str) -> VehicleMetadata {
    VehicleMetadata::new(current, last, year)
}

fn all_with(status: Status, memo: &str) -> Checklist {
    Checklist::from_entries((0..12).map(|_| ChecklistEntry::new(status, memo)))
}

fn correct(vehicle: &VehicleMetadata, checklist: &Checklist) -> Correction {
    Corrector::default().correct_for_year(vehicle, checklist, YEAR)
}

#[test]
fn quiet_vehicle_only_normalizes_memos() {
    let out = correct(&vehicle("25000", "20000", "2022"), &Checklist::new());

    assert!(out.report.fired.is_empty());
    for (_, entry) in out.checklist.iter() {
        assert_eq!(entry.status, Some(Status::Good));
        assert_eq!(entry.memo, "정상 범위");
    }
}

#[test]
fn oil_watch_moves_good_to_normal() {
    let out = correct(&vehicle("58000", "50000", "2022"), &Checklist::new());
    let oil = &out.checklist[ChecklistSlot::EngineOil];

    assert_eq!(oil.status, Some(Status::Normal));
    assert_eq!(oil.memo, "교환 주기 근접");
    assert_eq!(
        out.report.fired,
        vec![RuleFiring {
            rule: RuleId::OilChangeApproaching,
            slot: ChecklistSlot::EngineOil,
            previous: Some(Status::Good),
            status: Status::Normal,
        }]
    );
}

#[test]
fn oil_watch_threshold_is_exclusive() {
    let out = correct(&vehicle("57000", "50000", "2022"), &Checklist::new());
    assert_eq!(out.checklist[ChecklistSlot::EngineOil].status, Some(Status::Good));
}

#[test]
fn oil_watch_leaves_non_good_status_alone() {
    let mut checklist = Checklist::new();
    checklist.set(ChecklistSlot::EngineOil, ChecklistEntry::new(Status::Bad, "누유"));

    let out = correct(&vehicle("58000", "50000", "2022"), &checklist);
    let oil = &out.checklist[ChecklistSlot::EngineOil];

    assert_eq!(oil.status, Some(Status::Bad));
    assert_eq!(oil.memo, "누유");
    assert!(out.report.fired.is_empty());
}

#[test]
fn overdue_oil_is_bad_regardless_of_starting_status() {
    for status in [Status::Good, Status::Normal, Status::Bad] {
        let mut checklist = Checklist::new();
        checklist.set(ChecklistSlot::EngineOil, ChecklistEntry::new(status, "메모"));

        let out = correct(&vehicle("62000", "50000", "2022"), &checklist);
        let oil = &out.checklist[ChecklistSlot::EngineOil];

        assert_eq!(out.report.mileage_diff, 12_000);
        assert_eq!(oil.status, Some(Status::Bad), "starting from {status:?}");
        assert_eq!(oil.memo, "즉시 교환 권장");
    }
}

#[test]
fn overdue_oil_overrides_the_watch_rule() {
    let out = correct(&vehicle("62000", "50000", "2022"), &Checklist::new());
    let rules: Vec<RuleId> = out.report.fired.iter().map(|f| f.rule).collect();

    assert_eq!(
        rules,
        vec![RuleId::OilChangeApproaching, RuleId::OilChangeOverdue]
    );
    assert_eq!(out.report.fired[1].previous, Some(Status::Normal));
}

#[test]
fn unset_status_is_never_downgraded() {
    let checklist: Checklist = serde_json::from_str(
        r#"[{"status":"good"},{"status":"good"},{"memo":"오일 누유 의심"}]"#,
    )
    .expect("checklist parses");

    let out = correct(&vehicle("58000", "50000", "2022"), &checklist);
    let oil = &out.checklist[ChecklistSlot::EngineOil];

    assert!(out.report.fired.is_empty());
    assert_eq!(oil.status, Some(Status::Good));
    assert_eq!(oil.memo, "오일 누유 의심");
}

#[test]
fn overdue_oil_marks_an_unset_slot_bad() {
    let mut checklist = Checklist::new();
    checklist.set(ChecklistSlot::EngineOil, ChecklistEntry::unset("누유"));

    let out = correct(&vehicle("62000", "50000", "2022"), &checklist);

    assert_eq!(
        out.report.fired,
        vec![RuleFiring {
            rule: RuleId::OilChangeOverdue,
            slot: ChecklistSlot::EngineOil,
            previous: None,
            status: Status::Bad,
        }]
    );
    assert_eq!(out.checklist[ChecklistSlot::EngineOil].memo, "즉시 교환 권장");
}

#[test]
fn rules_skip_unsupplied_slots() {
    let checklist = Checklist::from_entries(vec![ChecklistEntry::new(Status::Good, "")]);

    // Overdue oil, aged vehicle and a brake pad window all apply here.
    let out = correct(&vehicle("82000", "50000", "2010"), &checklist);

    assert!(out.report.fired.is_empty());
    for (slot, entry) in out.checklist.iter() {
        assert_eq!(entry.status, Some(Status::Good), "{slot:?}");
        assert_eq!(entry.memo, "정상 범위", "{slot:?}");
    }
}

#[test]
fn normalize_fills_unset_and_unsupplied_slots_with_good() {
    let mut checklist = Checklist::empty();
    checklist.set(ChecklistSlot::Tires, ChecklistEntry::unset(""));

    let out = Corrector::default().normalize(&checklist);

    assert!(ChecklistSlot::ALL.iter().all(|slot| out.is_supplied(*slot)));
    assert_eq!(out[ChecklistSlot::Tires], ChecklistEntry::new(Status::Good, "정상 범위"));
    assert_eq!(out[ChecklistSlot::Battery], ChecklistEntry::new(Status::Good, "정상 범위"));
}

#[test]
fn negative_mileage_diff_triggers_nothing() {
    let out = correct(&vehicle("30000", "50000", "2022"), &Checklist::new());
    assert_eq!(out.report.mileage_diff, -20_000);
    assert!(out.report.fired.is_empty());
}

#[test]
fn seven_year_old_vehicle_is_not_aged() {
    let out = correct(&vehicle("", "", "2019"), &Checklist::new());

    assert_eq!(out.report.vehicle_age, 7);
    assert_eq!(out.checklist[ChecklistSlot::Belts].status, Some(Status::Good));
    assert_eq!(out.checklist[ChecklistSlot::Coolant].status, Some(Status::Good));
}

#[test]
fn eight_year_old_vehicle_gets_belt_and_coolant_checks() {
    let out = correct(&vehicle("", "", "2018"), &Checklist::new());

    assert_eq!(out.report.vehicle_age, 8);
    let belts = &out.checklist[ChecklistSlot::Belts];
    let coolant = &out.checklist[ChecklistSlot::Coolant];
    assert_eq!(belts.status, Some(Status::Normal));
    assert_eq!(belts.memo, "연식 기반 노후 점검");
    assert_eq!(coolant.status, Some(Status::Normal));
    assert_eq!(coolant.memo, "냉각수 상태 확인");
}

#[test]
fn age_rule_keeps_worse_statuses() {
    let mut checklist = Checklist::new();
    checklist.set(ChecklistSlot::Belts, ChecklistEntry::new(Status::Bad, ""));

    let out = correct(&vehicle("", "", "2010"), &checklist);

    assert_eq!(out.checklist[ChecklistSlot::Belts].status, Some(Status::Bad));
    assert_eq!(out.checklist[ChecklistSlot::Belts].memo, "즉시 정비 요망");
    assert_eq!(out.checklist[ChecklistSlot::Coolant].status, Some(Status::Normal));
}

#[test]
fn unknown_year_assumes_five_years() {
    for year in ["", "미상", "0"] {
        let out = correct(&vehicle("", "", year), &Checklist::new());
        assert_eq!(out.report.vehicle_age, 5, "year {year:?}");
        assert_eq!(out.checklist[ChecklistSlot::Belts].status, Some(Status::Good));
    }
}

#[test]
fn brake_pad_window_follows_each_forty_thousand() {
    let cases = [
        ("0", Status::Good),
        ("39999", Status::Good),
        ("40000", Status::Normal),
        ("42999", Status::Normal),
        ("43000", Status::Good),
        ("80500", Status::Normal),
        ("1500", Status::Normal),
    ];
    for (mileage, expected) in cases {
        let out = correct(&vehicle(mileage, mileage, "2022"), &Checklist::new());
        let pads = &out.checklist[ChecklistSlot::BrakePads];
        assert_eq!(pads.status, Some(expected), "mileage {mileage}");
        if expected == Status::Normal {
            assert_eq!(pads.memo, "마모도 정밀 체크");
        }
    }
}

#[test]
fn input_checklist_is_not_mutated() {
    let original = all_with(Status::Good, "");
    let snapshot = original.clone();

    let out = correct(&vehicle("62000", "50000", "2010"), &original);

    assert_eq!(original, snapshot);
    assert_ne!(out.checklist, original);
    assert!(!std::ptr::eq(&out.checklist, &original));
}

#[test]
fn long_memos_are_shortened_to_twenty_characters() {
    let memo = "abcdefghijklmnopqrstuvwxy";
    assert_eq!(memo.chars().count(), 25);

    let out = correct(&vehicle("", "", "2022"), &all_with(Status::Normal, memo));
    let shortened = &out.checklist[ChecklistSlot::Tires].memo;

    assert_eq!(shortened, "abcdefghijklmnopq...");
    assert_eq!(shortened.chars().count(), 20);
}

#[test]
fn twenty_character_memo_is_kept() {
    let memo = "가".repeat(20);
    let out = correct(&vehicle("", "", "2022"), &all_with(Status::Good, &memo));
    assert_eq!(out.checklist[ChecklistSlot::Wipers].memo, memo);
}

#[test]
fn placeholder_and_empty_memos_take_status_defaults() {
    let checklist = Checklist::from_entries(vec![
        ChecklistEntry::new(Status::Bad, ""),
        ChecklistEntry::new(Status::Normal, "정상"),
        ChecklistEntry::new(Status::Good, "정상 범위"),
        ChecklistEntry::new(Status::Bad, "정상"),
        ChecklistEntry::new(Status::Good, "타이어 편마모"),
        ChecklistEntry::new(Status::Good, " "),
    ]);
    let out = Corrector::default().normalize(&checklist);

    let memos: Vec<&str> = out.iter().take(6).map(|(_, e)| e.memo.as_str()).collect();
    assert_eq!(
        memos,
        vec![
            "즉시 정비 요망",
            "상태 주의/관찰",
            "정상 범위",
            "즉시 정비 요망",
            "타이어 편마모",
            " "
        ]
    );
}

#[test]
fn english_catalog_is_applied_and_shortened() {
    let corrector = Corrector::new(RuleConfig {
        memos: MemoCatalog::english(),
        ..RuleConfig::default()
    })
    .expect("valid config");

    let out = corrector.correct_for_year(&vehicle("58000", "50000", "2022"), &Checklist::new(), YEAR);

    assert_eq!(out.checklist[ChecklistSlot::EngineOil].memo, "approaching chang...");
    assert_eq!(out.checklist[ChecklistSlot::Tires].memo, "normal range");
}

#[test]
fn custom_thresholds_apply() {
    let corrector = Corrector::new(RuleConfig {
        oil_watch_diff: 1_000,
        aged_vehicle_years: 3,
        ..RuleConfig::default()
    })
    .expect("valid config");

    let out = corrector.correct_for_year(&vehicle("21500", "20000", "2022"), &Checklist::new(), YEAR);

    assert_eq!(out.checklist[ChecklistSlot::EngineOil].status, Some(Status::Normal));
    assert_eq!(out.checklist[ChecklistSlot::Belts].status, Some(Status::Normal));
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    let err = Corrector::new(RuleConfig {
        brake_pad_interval: 0,
        ..RuleConfig::default()
    })
    .expect_err("zero interval is invalid");
    assert!(matches!(err, RuleError::InvalidConfig(_)));
}

#[test]
fn correction_is_deterministic() {
    let checklist = all_with(Status::Good, "정상");
    let vehicle = vehicle("80,500km", "69000", "2015년");
    assert_eq!(correct(&vehicle, &checklist), correct(&vehicle, &checklist));
}

#[test]
fn apply_rules_uses_current_year() {
    let corrected = apply_rules(&vehicle("62000", "50000", ""), &Checklist::new());
    assert_eq!(corrected[ChecklistSlot::EngineOil].status, Some(Status::Bad));
    // Unknown year is always five years old, whatever the current year.
    assert_eq!(corrected[ChecklistSlot::Belts].status, Some(Status::Good));
}
