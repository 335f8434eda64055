// SPDX-License-Identifier: Apache-2.0

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::arch::{active, portable};
    use crate::constants::{BATCH_ALIGN, LANES_F32, LANES_F64, LANES_I32};
    use crate::lanes::{F32x8, F64x4, I32x8, Lane, Lanes, Relation};
    use crate::{Backend, SearchPlan};

    const RELATIONS: [Relation; 4] = [
        Relation::Less,
        Relation::LessEqual,
        Relation::Greater,
        Relation::GreaterEqual,
    ];

    // =============================================================================
    //  BATCH CONSTRUCTION
    // =============================================================================

    #[test]
    fn test_lane_counts_and_alignment() {
        assert_eq!(<f32 as Lane>::LANES, LANES_F32);
        assert_eq!(<i32 as Lane>::LANES, LANES_I32);
        assert_eq!(<f64 as Lane>::LANES, LANES_F64);

        assert_eq!(std::mem::align_of::<F32x8>(), BATCH_ALIGN);
        assert_eq!(std::mem::align_of::<I32x8>(), BATCH_ALIGN);
        assert_eq!(std::mem::align_of::<F64x4>(), BATCH_ALIGN);
        assert_eq!(std::mem::size_of::<F32x8>(), 32);
        assert_eq!(std::mem::size_of::<F64x4>(), 32);
    }

    #[test]
    fn test_splat_gather_extract() {
        let splat = <i32 as Lane>::splat(7);
        for lane in 0..8 {
            assert_eq!(<i32 as Lane>::lane(&splat, lane), 7);
        }

        let batch = <f32 as Lane>::gather(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        assert_eq!(<f32 as Lane>::extract::<0>(&batch), 0.0);
        assert_eq!(<f32 as Lane>::extract::<5>(&batch), 5.0);
        assert_eq!(<f32 as Lane>::extract::<7>(&batch), 7.0);

        let wide = <f64 as Lane>::gather(&[-1.5, 0.0, 1.5, 3.0]);
        assert_eq!(<f64 as Lane>::extract::<3>(&wide), 3.0);
        assert_eq!(wide.as_array(), &[-1.5, 0.0, 1.5, 3.0]);
    }

    #[test]
    #[should_panic]
    fn test_gather_rejects_short_input() {
        let _ = <i32 as Lane>::gather(&[1, 2, 3]);
    }

    #[test]
    fn test_lanes_map() {
        let batch: I32x8 = Lanes([1, 2, 3, 4, 5, 6, 7, 8]);
        let doubled = batch.map(|v| v * 2);
        assert_eq!(doubled.0, [2, 4, 6, 8, 10, 12, 14, 16]);
    }

    // =============================================================================
    //  COMPARISON MASKS
    // =============================================================================

    #[test]
    fn test_f32_masks_against_splat() {
        let keys = <f32 as Lane>::gather(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let four = <f32 as Lane>::splat(4.0);

        assert_eq!(<f32 as Lane>::cmp_lt(&keys, &four), 0b0000_0111);
        assert_eq!(<f32 as Lane>::cmp_le(&keys, &four), 0b0000_1111);
        assert_eq!(<f32 as Lane>::cmp_gt(&keys, &four), 0b1111_0000);
        assert_eq!(<f32 as Lane>::cmp_ge(&keys, &four), 0b1111_1000);
    }

    #[test]
    fn test_i32_masks_with_negatives() {
        let keys = <i32 as Lane>::gather(&[i32::MIN, -3, -1, 0, 0, 2, 9, i32::MAX]);
        let zero = <i32 as Lane>::splat(0);

        assert_eq!(<i32 as Lane>::cmp_lt(&keys, &zero), 0b0000_0111);
        assert_eq!(<i32 as Lane>::cmp_le(&keys, &zero), 0b0001_1111);
        assert_eq!(<i32 as Lane>::cmp_gt(&keys, &zero), 0b1110_0000);
        assert_eq!(<i32 as Lane>::cmp_ge(&keys, &zero), 0b1111_1000);
    }

    #[test]
    fn test_f64_masks_use_four_bits() {
        let keys = <f64 as Lane>::gather(&[1.0, 2.0, 3.0, 4.0]);
        let pivot = <f64 as Lane>::splat(2.5);

        assert_eq!(<f64 as Lane>::cmp_lt(&keys, &pivot), 0b0011);
        assert_eq!(<f64 as Lane>::cmp_le(&keys, &pivot), 0b0011);
        assert_eq!(<f64 as Lane>::cmp_gt(&keys, &pivot), 0b1100);
        assert_eq!(<f64 as Lane>::cmp_ge(&keys, &pivot), 0b1100);
        assert_eq!(<f64 as Lane>::cmp_ge(&keys, &keys), 0b1111);
    }

    #[test]
    fn test_nan_lanes_compare_false() {
        let keys = <f32 as Lane>::gather(&[1.0, f32::NAN, 3.0, f32::NAN, 5.0, 6.0, 7.0, 8.0]);
        let nan = <f32 as Lane>::splat(f32::NAN);
        let five = <f32 as Lane>::splat(5.0);

        for relation in RELATIONS {
            assert_eq!(<f32 as Lane>::cmp(relation, &keys, &nan), 0, "{relation:?}");
        }
        assert_eq!(<f32 as Lane>::cmp_lt(&keys, &five), 0b0000_0101);
        assert_eq!(<f32 as Lane>::cmp_ge(&keys, &five), 0b1111_0000);

        let wide = <f64 as Lane>::gather(&[f64::NAN, 1.0, f64::NAN, 2.0]);
        assert_eq!(<f64 as Lane>::cmp_le(&wide, &<f64 as Lane>::splat(2.0)), 0b1010);
    }

    #[test]
    fn test_relation_holds() {
        assert!(Relation::Less.holds(&1, &2));
        assert!(!Relation::Less.holds(&2, &2));
        assert!(Relation::LessEqual.holds(&2, &2));
        assert!(Relation::Greater.holds("b", "a"));
        assert!(Relation::GreaterEqual.holds(&2.0, &2.0));
        assert!(!Relation::GreaterEqual.holds(&f64::NAN, &f64::NAN));
    }

    #[test]
    fn test_backend_is_reported_in_plans() {
        let plan = SearchPlan::scalar();
        assert_eq!(plan.backend, Backend::active());
        if cfg!(feature = "disable-simd") {
            assert_eq!(Backend::active(), Backend::Portable);
        }
    }

    // =============================================================================
    //  ACTIVE KERNELS AGAINST THE PORTABLE REFERENCE
    // =============================================================================

    fn f32_lane() -> impl Strategy<Value = f32> {
        prop_oneof![
            8 => -1.0e6f32..1.0e6f32,
            1 => Just(f32::NAN),
            1 => prop::sample::select(vec![0.0f32, -0.0, f32::INFINITY, f32::NEG_INFINITY]),
        ]
    }

    fn f64_lane() -> impl Strategy<Value = f64> {
        prop_oneof![
            8 => -1.0e12f64..1.0e12f64,
            1 => Just(f64::NAN),
            1 => prop::sample::select(vec![0.0f64, -0.0, f64::INFINITY, f64::NEG_INFINITY]),
        ]
    }

    proptest! {
        #[test]
        fn active_f32_kernel_matches_portable(
            lhs in prop::array::uniform8(f32_lane()),
            rhs in prop::array::uniform8(f32_lane()),
        ) {
            let (lhs, rhs) = (Lanes(lhs), Lanes(rhs));
            for relation in RELATIONS {
                prop_assert_eq!(
                    active::cmp_f32x8(&lhs, &rhs, relation),
                    portable::cmp_f32x8(&lhs, &rhs, relation)
                );
            }
        }

        #[test]
        fn active_i32_kernel_matches_portable(
            lhs in prop::array::uniform8(any::<i32>()),
            rhs in prop::array::uniform8(any::<i32>()),
        ) {
            let (lhs, rhs) = (Lanes(lhs), Lanes(rhs));
            for relation in RELATIONS {
                prop_assert_eq!(
                    active::cmp_i32x8(&lhs, &rhs, relation),
                    portable::cmp_i32x8(&lhs, &rhs, relation)
                );
            }
        }

        #[test]
        fn active_f64_kernel_matches_portable(
            lhs in prop::array::uniform4(f64_lane()),
            rhs in prop::array::uniform4(f64_lane()),
        ) {
            let (lhs, rhs) = (Lanes(lhs), Lanes(rhs));
            for relation in RELATIONS {
                prop_assert_eq!(
                    active::cmp_f64x4(&lhs, &rhs, relation),
                    portable::cmp_f64x4(&lhs, &rhs, relation)
                );
            }
        }

        #[test]
        fn i32_masks_match_scalar_relation(
            lhs in prop::array::uniform8(-4i32..4),
            value in -4i32..4,
        ) {
            let batch = Lanes(lhs);
            let splat = <i32 as Lane>::splat(value);
            for relation in RELATIONS {
                let expected = lhs
                    .iter()
                    .enumerate()
                    .fold(0u32, |mask, (i, key)| mask | ((relation.holds(key, &value) as u32) << i));
                prop_assert_eq!(<i32 as Lane>::cmp(relation, &batch, &splat), expected);
            }
        }
    }
}
