#[cfg(test)]
mod tests {
    use super::super::constants::INVENTORY_CAPACITY;
    use super::super::strategies::*;

    fn assert_plan_invariants(plan: &PurchasePlan, gold: i64) {
        assert!(
            plan.total_cost <= gold.max(0),
            "plan cost {} exceeds gold {}",
            plan.total_cost,
            gold
        );
        assert!(
            plan.total_items <= INVENTORY_CAPACITY,
            "plan items {} exceed capacity",
            plan.total_items
        );
        assert_eq!(plan.total_items, plan.near_items.len() + plan.far_items.len());
        assert_eq!(plan.visits_far_shop, !plan.far_items.is_empty());

        let recomputed: i64 = plan
            .near_items
            .iter()
            .chain(plan.far_items.iter())
            .map(|item| item.cost)
            .sum();
        assert_eq!(recomputed, plan.total_cost);
    }

    #[test]
    fn test_greedy_fills_costliest_first() {
        let candidates = shop_candidates(ShopLocation::Near);
        let plan = GreedyPlanner.plan(&candidates, 3200, INVENTORY_CAPACITY);

        // Two abaci at 1600 each consume all the gold.
        assert_eq!(plan.total_cost, 3200);
        assert_eq!(plan.total_items, 2);
        assert!(plan.near_items.iter().all(|item| item.cost == 1600));
        assert_plan_invariants(&plan, 3200);
    }

    #[test]
    fn test_greedy_respects_capacity() {
        let candidates = shop_candidates(ShopLocation::Near);
        let plan = GreedyPlanner.plan(&candidates, 100_000, INVENTORY_CAPACITY);

        assert_eq!(plan.total_items, INVENTORY_CAPACITY);
        assert_eq!(plan.total_cost, 1600 * INVENTORY_CAPACITY as i64);
        assert_plan_invariants(&plan, 100_000);
    }

    #[test]
    fn test_planner_invariants_across_gold_range() {
        let near = shop_candidates(ShopLocation::Near);
        let far = shop_candidates(ShopLocation::Far);
        let abacus_planner = AbacusGreedyPlanner {
            count_threshold: 2,
            price_cutoff: 900,
        };
        let planners: [&dyn PurchasePlanner; 3] = [&GreedyPlanner, &MaxSpendPlanner, &abacus_planner];

        let mut gold = -500;
        while gold <= 20_000 {
            for planner in &planners {
                for candidates in [&near, &far] {
                    let plan = planner.plan(candidates, gold, INVENTORY_CAPACITY);
                    assert_plan_invariants(&plan, gold);
                }
            }
            gold += 137;
        }
    }

    #[test]
    fn test_max_spend_beats_or_matches_greedy() {
        let near = shop_candidates(ShopLocation::Near);
        let far = shop_candidates(ShopLocation::Far);

        let mut gold = 0;
        while gold <= 15_000 {
            for candidates in [&near, &far] {
                let greedy = GreedyPlanner.plan(candidates, gold, INVENTORY_CAPACITY);
                let optimal = MaxSpendPlanner.plan(candidates, gold, INVENTORY_CAPACITY);
                assert!(
                    optimal.total_cost >= greedy.total_cost,
                    "max-spend {} worse than greedy {} at gold {}",
                    optimal.total_cost,
                    greedy.total_cost,
                    gold
                );
            }
            gold += 97;
        }
    }

    #[test]
    fn test_max_spend_finds_optimal_combination() {
        let candidates = shop_candidates(ShopLocation::Near);

        // Greedy takes one 1600 abacus and strands 400 gold; spending
        // 1250 + 750 uses everything.
        let greedy = GreedyPlanner.plan(&candidates, 2000, INVENTORY_CAPACITY);
        let optimal = MaxSpendPlanner.plan(&candidates, 2000, INVENTORY_CAPACITY);

        assert_eq!(greedy.total_cost, 1600);
        assert_eq!(optimal.total_cost, 2000);
        assert_plan_invariants(&optimal, 2000);
    }

    #[test]
    fn test_max_spend_breaks_ties_by_item_count() {
        let candidates = shop_candidates(ShopLocation::Near);

        // 1100 gold: two 550 sickles tie no other spend and win on count.
        let plan = MaxSpendPlanner.plan(&candidates, 1100, INVENTORY_CAPACITY);
        assert_eq!(plan.total_cost, 1100);
        assert_eq!(plan.total_items, 2);
    }

    #[test]
    fn test_abacus_quota_skips_cheap_items() {
        let candidates = shop_candidates(ShopLocation::Near);
        let planner = AbacusGreedyPlanner {
            count_threshold: 1,
            price_cutoff: 900,
        };

        let plan = planner.plan(&candidates, 6000, INVENTORY_CAPACITY);

        // Three abaci fill the quota; everything at or below 900 is skipped.
        assert_eq!(plan.total_cost, 4800);
        assert_eq!(plan.total_items, 3);
        assert!(plan.near_items.iter().all(|item| item.cost == 1600));

        // Plain greedy would also pick up an 880 spear.
        let greedy = GreedyPlanner.plan(&candidates, 6000, INVENTORY_CAPACITY);
        assert_eq!(greedy.total_cost, 5680);
        assert_eq!(greedy.total_items, 4);
    }

    #[test]
    fn test_abacus_strategy_without_parameters_degrades_to_greedy() {
        let planner = planner_for(PurchaseStrategy::AbacusGreedy, None, None);
        assert_eq!(planner.name(), "greedy");

        let planner = planner_for(PurchaseStrategy::AbacusGreedy, Some(2), None);
        assert_eq!(planner.name(), "greedy");

        let planner = planner_for(PurchaseStrategy::AbacusGreedy, Some(2), Some(900));
        assert_eq!(planner.name(), "abacus-greedy");
    }

    #[test]
    fn test_empty_plan_when_broke() {
        let candidates = shop_candidates(ShopLocation::Near);

        for planner in [
            &GreedyPlanner as &dyn PurchasePlanner,
            &MaxSpendPlanner,
        ] {
            let plan = planner.plan(&candidates, 0, INVENTORY_CAPACITY);
            assert_eq!(plan.total_items, 0);
            assert_eq!(plan.total_cost, 0);

            let plan = planner.plan(&candidates, 100, INVENTORY_CAPACITY);
            assert_eq!(plan.total_items, 0, "nothing near costs 100 or less");
        }
    }

    #[test]
    fn test_choose_shop() {
        // Far shop disabled: always near.
        assert_eq!(choose_shop(100, false), ShopLocation::Near);
        assert_eq!(choose_shop(100_000, false), ShopLocation::Near);

        // Near affordable: near wins even with the far shop enabled.
        assert_eq!(choose_shop(550, true), ShopLocation::Near);

        // Nothing near affordable, far has a 180 item.
        assert_eq!(choose_shop(300, true), ShopLocation::Far);

        // Nothing affordable anywhere: stay near.
        assert_eq!(choose_shop(100, true), ShopLocation::Near);
    }

    #[test]
    fn test_initial_walk_prefers_costliest_affordable_item() {
        // Near's 1250 beats far's 1200, so stay near.
        let plan = plan_initial_walk(1400, true);
        assert!(!plan.visits_far_shop);
        assert!(!plan.near_items.is_empty());

        // Only the far shop has anything affordable at 500 gold.
        let plan = plan_initial_walk(500, true);
        assert!(plan.visits_far_shop);
        assert_eq!(plan.total_items, 1);
        assert_eq!(plan.total_cost, 350);

        // Far's 1500 axe beats near's 1250 between those price points.
        let plan = plan_initial_walk(1550, true);
        assert!(plan.visits_far_shop);

        // Far shop disabled: near catalog regardless.
        let plan = plan_initial_walk(500, false);
        assert_eq!(plan.total_items, 0);
        assert!(!plan.visits_far_shop);
    }

    #[test]
    fn test_plan_trip_uses_shop_selection() {
        let planner = planner_for(PurchaseStrategy::Greedy, None, None);

        let plan = plan_trip(planner.as_ref(), 300, true);
        assert!(plan.visits_far_shop);
        assert!(plan.total_items > 0);

        let plan = plan_trip(planner.as_ref(), 300, false);
        assert_eq!(plan.total_items, 0);

        let plan = plan_trip(planner.as_ref(), -100, true);
        assert_eq!(plan.total_items, 0);
    }

    #[test]
    fn test_purchase_strategy_names_round_trip() {
        for name in PurchaseStrategy::all_names() {
            let strategy = PurchaseStrategy::from_str(name).expect("known name");
            assert_eq!(strategy.as_str(), name);
        }
        assert_eq!(PurchaseStrategy::from_str("optimal"), None);
    }
}
