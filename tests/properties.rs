use proptest::prelude::*;
use rand::prelude::*;

use tenpai_duel::actor::create_actor;
use tenpai_duel::control::dora::next_kind;
use tenpai_duel::control::engine::{Outcome, RoundEngine};
use tenpai_duel::control::possible_actions::calc_possible_actions;
use tenpai_duel::hand::*;
use tenpai_duel::model::*;

fn random_table(seed: u64, n: usize) -> TileTable {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut tt = [0; KIND];
    for id in rand::seq::index::sample(&mut rng, TOTAL_TILE, n).into_vec() {
        tt[id / TILE] += 1;
    }
    tt
}

// 1色に偏らせた手牌 (聴牌形が出やすい)
fn random_flush_table(seed: u64, n: usize) -> TileTable {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut tt = [0; KIND];
    for id in rand::seq::index::sample(&mut rng, SUIT_LEN * TILE, n).into_vec() {
        tt[id / TILE] += 1;
    }
    tt
}

fn check_waits(tt: &TileTable) -> Result<(), TestCaseError> {
    let total: usize = tt.iter().sum();
    let waits = waiting_tile_kinds(tt);
    for k in 0..KIND {
        if tt[k] >= TILE {
            prop_assert!(!waits.contains(&k));
            continue;
        }
        let mut h = *tt;
        h[k] += 1;
        prop_assert_eq!(waits.contains(&k), is_winning_hand(&h, total + 1), "kind {}", k);
    }
    Ok(())
}

proptest! {
    #[test]
    fn waits_are_exactly_the_winning_kinds(seed in any::<u64>()) {
        check_waits(&random_table(seed, 13))?;
        check_waits(&random_flush_table(seed, 13))?;
        check_waits(&random_flush_table(seed, 7))?;
    }

    #[test]
    fn seven_distinct_pairs_win(kinds in proptest::sample::subsequence((0..KIND).collect::<Vec<_>>(), 7)) {
        let mut tt = [0; KIND];
        for &k in &kinds {
            tt[k] = 2;
        }
        prop_assert!(is_winning_hand(&tt, 14));

        // 6対子+単騎は単騎の牌種で待つ
        tt[kinds[6]] = 1;
        prop_assert!(waiting_tile_kinds(&tt).contains(&kinds[6]));
    }

    #[test]
    fn tenpai_discards_match_waits(seed in any::<u64>()) {
        let tt = random_flush_table(seed, 14);
        for (k, waits) in calc_discards_to_tenpai(&tt) {
            let mut h = tt;
            h[k] -= 1;
            prop_assert_eq!(waiting_tile_kinds(&h), waits);
        }
    }

    #[test]
    fn engine_keeps_invariants(seed in any::<u64>(), declare_rate in 0.0f64..1.0) {
        let mut eng = RoundEngine::new(seed, Rule::default(), vec![]);
        let mut actors = [
            create_actor(&format!("Random({},0,{})", declare_rate, seed)).unwrap(),
            create_actor(&format!("Random({},0,{})", declare_rate, seed ^ 1)).unwrap(),
        ];
        for (s, a) in actors.iter_mut().enumerate() {
            a.init(s, seed.wrapping_add(s as u64));
        }
        eng.start_round().unwrap();

        let mut n_step = 0;
        loop {
            n_step += 1;
            prop_assert!(n_step < 10000);
            let stg = eng.state().unwrap();
            stg.verify().unwrap();
            prop_assert!(stg.draw_count <= stg.max_draws);

            let seat = stg.acting_seat().unwrap();
            let res = match stg.pending {
                Pending::Draw | Pending::SelfDraw => eng.draw_for_turn(seat),
                Pending::Guess => {
                    let kinds = actors[seat].select_guess(stg, 2);
                    eng.submit_guess(seat, &kinds)
                }
                _ => {
                    let acts = calc_possible_actions(stg, seat);
                    prop_assert!(!acts.is_empty());
                    let act = actors[seat].select_action(stg, &acts);
                    match (act.action_type, act.index) {
                        (ActionType::Discard, Some(i)) => eng.discard(seat, i),
                        (ActionType::Declare, Some(i)) => eng.declare_tenpai(seat, i),
                        (ActionType::Tsumo, _) => eng.accept_self_draw_win(seat),
                        (ActionType::Nop, _) => eng.pass_call(seat),
                        (_, _) => eng.offer_call(seat, act.meld_type().unwrap()),
                    }
                }
            };
            if let Outcome::RoundEnd(r) = res.unwrap() {
                let stg = eng.state().unwrap();
                stg.verify().unwrap();
                prop_assert_eq!(stg.result.as_ref(), Some(&r));
                prop_assert_eq!(stg.dora.is_ura_revealed(), r.winner().is_some());
                break;
            }
        }
    }
}

#[test]
fn next_kind_is_a_permutation() {
    let mut seen = [false; KIND];
    for k in 0..KIND {
        let n = next_kind(k);
        assert!(!seen[n]);
        seen[n] = true;
        // 同じグループ内で循環
        assert_eq!(is_honor_kind(k), is_honor_kind(n));
    }

    for k in [0, 9, 18] {
        let mut x = k;
        for _ in 0..SUIT_LEN {
            x = next_kind(x);
        }
        assert_eq!(x, k);
    }
    let mut x = WIND;
    for _ in 0..4 {
        x = next_kind(x);
    }
    assert_eq!(x, WIND);
    let mut x = DRAGON;
    for _ in 0..3 {
        x = next_kind(x);
    }
    assert_eq!(x, DRAGON);
}
