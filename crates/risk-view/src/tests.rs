#[cfg(test)]
mod risk_view_tests {
    use crate::view::{CATEGORY_PLACEHOLDER, EXPOSURE_PLACEHOLDER, RISK_LEVEL_PLACEHOLDER};
    use crate::*;

    fn seed_view() -> RiskView {
        RiskView::from_source(&SeedDataset).expect("seed data is valid")
    }

    fn connected_view() -> RiskView {
        let mut view = seed_view();
        view.set_connected(true);
        view
    }

    fn shown(view: &RiskView) -> Vec<(String, u8)> {
        view.project()
            .iter()
            .map(|r| (r.category.clone(), r.exposure))
            .collect()
    }

    #[test]
    fn high_filter_sorted_by_exposure() {
        let mut view = connected_view();
        view.set_query(ViewQuery::new(RiskFilter::High, SortKey::Exposure, ""));

        assert_eq!(
            shown(&view),
            vec![
                ("Cross-Chain Bridge".to_string(), 91),
                ("Smart Contract".to_string(), 85),
                ("Oracle Dependency".to_string(), 78),
            ]
        );
    }

    #[test]
    fn search_matches_any_case() {
        let mut view = connected_view();
        for term in ["liquid", "LIQUID", "LiQuId"] {
            view.set_search_term(term);
            let categories: Vec<&str> = view.project().categories().collect();
            assert_eq!(categories, vec!["Liquidity Pool"]);
        }
    }

    #[test]
    fn no_matches_is_distinct_from_disconnected() {
        let mut view = connected_view();
        view.set_search_term("zzz");
        assert!(view.project().is_empty());
        assert_eq!(view.status(), ViewStatus::NoMatches);
        assert_eq!(view.access(), AccessState::Connected);

        let mut locked = seed_view();
        locked.set_search_term("zzz");
        assert_eq!(locked.status(), ViewStatus::NoMatches);
        assert_eq!(locked.access(), AccessState::Locked);

        let empty = RiskView::new(RiskDataset::default());
        assert_eq!(empty.status(), ViewStatus::Empty);
    }

    #[test]
    fn mitigation_sort_surfaces_least_mitigated_first() {
        let mut view = connected_view();
        view.set_sort_key(SortKey::Mitigation);
        let order: Vec<(String, u8)> = view
            .project()
            .iter()
            .map(|r| (r.category.clone(), r.mitigation))
            .collect();

        assert_eq!(order.len(), 6);
        assert_eq!(order[0], ("Cross-Chain Bridge".to_string(), 32));
        assert_eq!(order[5], ("Governance Token".to_string(), 92));
    }

    #[test]
    fn impact_sort_descending() {
        let mut view = connected_view();
        view.set_sort_key(SortKey::Impact);
        let impacts: Vec<u8> = view.project().iter().map(|r| r.impact).collect();
        assert_eq!(impacts, vec![98, 95, 88, 65, 60, 35]);
    }

    #[test]
    fn reveal_all_only_touches_visible_cards() {
        let mut view = connected_view();
        view.set_risk_filter(RiskFilter::High);
        assert_eq!(view.reveal_all(), 3);

        for category in ["Smart Contract", "Oracle Dependency", "Cross-Chain Bridge"] {
            assert!(view.is_revealed(category));
        }
        for category in ["Liquidity Pool", "Governance Token", "Market Correlation"] {
            assert!(!view.is_revealed(category));
        }

        view.set_risk_filter(RiskFilter::All);
        assert_eq!(
            view.summary(),
            RevealSummary {
                revealed_count: 3,
                total_visible_count: 6,
            }
        );

        view.reveal_none();
        assert!(view.reveal_state().is_empty());
    }

    #[test]
    fn reveal_all_replaces_previous_reveals() {
        let mut view = connected_view();
        view.toggle_reveal("Liquidity Pool");
        view.set_risk_filter(RiskFilter::Low);
        view.reveal_all();
        assert!(view.is_revealed("Governance Token"));
        assert!(!view.is_revealed("Liquidity Pool"));
    }

    #[test]
    fn toggle_requires_connection() {
        let mut view = seed_view();
        assert_eq!(view.toggle_reveal("Smart Contract"), ToggleOutcome::Locked);
        assert_eq!(view.reveal_all(), 0);
        assert!(view.reveal_state().is_empty());

        view.set_connected(true);
        assert_eq!(view.toggle_reveal("Smart Contract"), ToggleOutcome::Revealed);
        assert_eq!(view.toggle_reveal("Smart Contract"), ToggleOutcome::Concealed);
    }

    #[test]
    fn toggle_unknown_category_is_ignored() {
        let mut view = connected_view();
        assert_eq!(
            view.toggle_reveal("Validator Set"),
            ToggleOutcome::UnknownCategory
        );
        assert!(view.reveal_state().is_empty());
    }

    #[test]
    fn disconnected_cards_show_labels_but_hide_values() {
        let view = seed_view();
        let cards = view.cards();
        assert_eq!(cards.len(), 6);

        let card = &cards[0];
        assert!(card.locked);
        assert!(!card.is_viewable);
        assert_eq!(card.category, Masked::Visible("Cross-Chain Bridge"));
        assert_eq!(card.risk_level, Masked::Visible("HIGH"));
        assert_eq!(card.exposure, Masked::Hidden(EXPOSURE_PLACEHOLDER));
        assert!(card.detail.is_none());
    }

    #[test]
    fn connected_unrevealed_cards_hide_everything() {
        let view = connected_view();
        for card in view.cards() {
            assert!(!card.locked);
            assert_eq!(card.category, Masked::Hidden(CATEGORY_PLACEHOLDER));
            assert_eq!(card.risk_level, Masked::Hidden(RISK_LEVEL_PLACEHOLDER));
            assert!(card.exposure.is_hidden());
            assert!(card.last_updated.is_hidden());
            assert!(card.detail.is_none());
        }
    }

    #[test]
    fn revealed_card_shows_breakdown() {
        let mut view = connected_view();
        view.toggle_reveal("Oracle Dependency");
        let record = view.dataset().get("Oracle Dependency").unwrap();
        let card = view.card(record);

        assert!(card.is_viewable && card.is_revealed);
        assert_eq!(card.exposure, Masked::Visible(Percent(78)));
        let detail = card.detail.as_ref().unwrap();
        assert_eq!(detail.impact, Percent(88));
        assert_eq!(detail.mitigation, Percent(45));
        assert_eq!(detail.trend, Trend::Stable);
        assert_eq!(
            card.to_string(),
            concat!(
                "[open] Oracle Dependency | HIGH | exposure 78% | 1 min ago",
                " | impact 88% | mitigation 45% | trend →"
            )
        );
    }

    #[test]
    fn disconnect_keeps_reveals_but_masks_them() {
        let mut view = connected_view();
        view.toggle_reveal("Smart Contract");
        view.set_connected(false);

        let record = view.dataset().get("Smart Contract").unwrap();
        assert!(view.is_revealed("Smart Contract"));
        assert!(!view.is_viewable(record));
        assert!(view.card(record).is_revealed);
        assert!(!view.card(record).is_viewable);
    }

    #[test]
    fn export_single_revealed_record() {
        let mut view = connected_view();
        view.toggle_reveal("Liquidity Pool");
        let csv = String::from_utf8(view.export_visible()).unwrap();

        assert_eq!(
            csv,
            format!("{}\nLiquidity Pool,42%,60%,78%,MEDIUM,5 mins ago", CSV_HEADER)
        );
        assert_eq!(csv.lines().count(), 2);
    }

    #[test]
    fn export_includes_revealed_records_hidden_by_filter() {
        let mut view = connected_view();
        view.toggle_reveal("Liquidity Pool");
        view.set_risk_filter(RiskFilter::High);
        assert!(view.cards().iter().all(|c| c.record.category != "Liquidity Pool"));

        let csv = String::from_utf8(view.export_visible()).unwrap();
        assert_eq!(
            csv,
            format!("{}\nLiquidity Pool,42%,60%,78%,MEDIUM,5 mins ago", CSV_HEADER)
        );
    }

    #[test]
    fn export_follows_record_order_not_sort() {
        let mut view = connected_view();
        view.set_query(ViewQuery::new(RiskFilter::All, SortKey::Mitigation, "e"));
        assert_eq!(view.reveal_all(), 4);
        view.set_search_term("");

        let csv = String::from_utf8(view.export_visible()).unwrap();
        let exported: Vec<&str> = csv
            .lines()
            .skip(1)
            .filter_map(|line| line.split(',').next())
            .collect();
        let expected = vec![
            "Oracle Dependency",
            "Governance Token",
            "Cross-Chain Bridge",
            "Market Correlation",
        ];
        assert_eq!(exported, expected);
    }

    #[test]
    fn export_while_disconnected_is_header_only() {
        let mut view = connected_view();
        view.reveal_all();
        view.set_connected(false);
        assert_eq!(view.export_visible(), CSV_HEADER.as_bytes());
    }

    #[test]
    fn snapshot_reports_query_and_counts() {
        let mut view = connected_view();
        view.set_query(ViewQuery::new(RiskFilter::Medium, SortKey::Impact, ""));
        view.toggle_reveal("Market Correlation");
        let snapshot = view.snapshot();

        assert_eq!(snapshot.access, AccessState::Connected);
        assert_eq!(snapshot.status, ViewStatus::Showing(2));
        assert_eq!(snapshot.query.risk_filter, RiskFilter::Medium);
        assert_eq!(snapshot.summary.revealed_count, 1);
        assert_eq!(snapshot.summary.total_visible_count, 2);
        assert_eq!(snapshot.cards[0].record.category, "Market Correlation");
        assert!(snapshot.cards[0].is_viewable);
        assert!(!snapshot.cards[1].is_viewable);
    }
}

#[cfg(test)]
mod risk_view_props {
    use proptest::prelude::*;

    use crate::*;

    fn arb_level() -> impl Strategy<Value = RiskLevel> {
        prop_oneof![
            Just(RiskLevel::High),
            Just(RiskLevel::Medium),
            Just(RiskLevel::Low)
        ]
    }

    fn arb_filter() -> impl Strategy<Value = RiskFilter> {
        prop_oneof![
            Just(RiskFilter::All),
            Just(RiskFilter::High),
            Just(RiskFilter::Medium),
            Just(RiskFilter::Low)
        ]
    }

    fn arb_sort() -> impl Strategy<Value = SortKey> {
        prop_oneof![
            Just(SortKey::Exposure),
            Just(SortKey::Impact),
            Just(SortKey::Mitigation)
        ]
    }

    fn arb_records() -> impl Strategy<Value = Vec<RiskRecord>> {
        prop::collection::vec((arb_level(), 0u8..=100, 0u8..=100, 0u8..=100), 0..12).prop_map(
            |rows| {
                rows.into_iter()
                    .enumerate()
                    .map(|(i, (level, exposure, impact, mitigation))| {
                        RiskRecord::new(
                            format!("Risk {}", i),
                            level,
                            exposure,
                            impact,
                            mitigation,
                            Trend::Stable,
                            "just now",
                        )
                    })
                    .collect()
            },
        )
    }

    fn view_over(records: Vec<RiskRecord>) -> RiskView {
        RiskView::new(RiskDataset::new(records).expect("generated records are valid"))
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 64,
            failure_persistence: None,
            ..ProptestConfig::default()
        })]

        #[test]
        fn unfiltered_projection_keeps_every_record(records in arb_records(), sort in arb_sort()) {
            let query = ViewQuery::new(RiskFilter::All, sort, "");
            let projection = project(&records, &query);
            prop_assert_eq!(projection.len(), records.len());

            let mut projected: Vec<&str> = projection.categories().collect();
            let mut original: Vec<&str> = records.iter().map(|r| r.category.as_str()).collect();
            projected.sort_unstable();
            original.sort_unstable();
            prop_assert_eq!(projected, original);
        }

        #[test]
        fn projection_respects_sort_direction(
            records in arb_records(),
            filter in arb_filter(),
            sort in arb_sort(),
        ) {
            let query = ViewQuery::new(filter, sort, "");
            let items: Vec<&RiskRecord> = project(&records, &query).iter().collect();
            for pair in items.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                match sort {
                    SortKey::Mitigation => { prop_assert!(a.mitigation <= b.mitigation); }
                    SortKey::Exposure => { prop_assert!(a.exposure >= b.exposure); }
                    SortKey::Impact => { prop_assert!(a.impact >= b.impact); }
                }
                prop_assert!(filter.matches(a.risk_level));
            }
        }

        #[test]
        fn viewable_iff_connected_and_revealed(
            records in arb_records(),
            picks in prop::collection::vec(any::<prop::sample::Index>(), 0..6),
            connected in any::<bool>(),
        ) {
            let mut view = view_over(records.clone());
            view.set_connected(true);
            if !records.is_empty() {
                for pick in &picks {
                    let category = &records[pick.index(records.len())].category;
                    view.toggle_reveal(category);
                }
            }
            view.set_connected(connected);

            for record in &records {
                let expected = connected && view.reveal_state().contains(&record.category);
                prop_assert_eq!(view.is_viewable(record), expected);
            }
        }

        #[test]
        fn double_toggle_is_identity(
            records in arb_records(),
            picks in prop::collection::vec(any::<prop::sample::Index>(), 0..6),
            target in any::<prop::sample::Index>(),
        ) {
            prop_assume!(!records.is_empty());
            let mut view = view_over(records.clone());
            view.set_connected(true);
            for pick in &picks {
                view.toggle_reveal(&records[pick.index(records.len())].category);
            }
            let before = view.reveal_state().clone();
            let key = &records[target.index(records.len())].category;
            view.toggle_reveal(key);
            view.toggle_reveal(key);
            prop_assert_eq!(view.reveal_state(), &before);
        }

        #[test]
        fn toggle_while_disconnected_never_mutates(
            records in arb_records(),
            picks in prop::collection::vec(any::<prop::sample::Index>(), 0..6),
            key in "[A-Za-z ]{0,16}",
        ) {
            let mut view = view_over(records.clone());
            view.set_connected(true);
            if !records.is_empty() {
                for pick in &picks {
                    view.toggle_reveal(&records[pick.index(records.len())].category);
                }
            }
            view.set_connected(false);
            let before = view.reveal_state().clone();

            prop_assert_eq!(view.toggle_reveal(&key), ToggleOutcome::Locked);
            for record in &records {
                prop_assert_eq!(view.toggle_reveal(&record.category), ToggleOutcome::Locked);
            }
            prop_assert_eq!(view.reveal_state(), &before);
        }
    }
}
