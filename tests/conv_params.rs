use detpost::{
    param_report, reduction_ratio, separable_param_count, vanilla_param_count, BatchNorm,
    ConvBlockSpec, DetPostError,
};

#[test]
fn mobilenet_classroom_numbers() {
    // The 3x3, 32 -> 512 block behind the classic ~9x reduction claim.
    let spec = ConvBlockSpec::new(3, 32, 512, 2).unwrap();

    let vanilla = vanilla_param_count(&spec, BatchNorm::WithRunningStats).unwrap();
    assert_eq!(vanilla, 147_456 + 4 * 512);

    let separable = separable_param_count(&spec, BatchNorm::WithRunningStats).unwrap();
    assert_eq!(separable, 288 + 4 * 32 + 16_384 + 4 * 512);

    let ratio = reduction_ratio(&spec, BatchNorm::WithRunningStats).unwrap();
    assert!((ratio - 149_504.0 / 18_848.0).abs() < 1e-9, "ratio was {ratio}");
}

#[test]
fn weight_only_arithmetic_without_batchnorm_inflation() {
    // Strip batch norm contributions to check the bare weight formulas.
    let spec = ConvBlockSpec::new(3, 32, 512, 2).unwrap();
    let bn_out = BatchNorm::ScaleShift.param_count(512);
    let bn_in = BatchNorm::ScaleShift.param_count(32);

    assert_eq!(
        vanilla_param_count(&spec, BatchNorm::ScaleShift).unwrap() - bn_out,
        147_456
    );
    assert_eq!(
        separable_param_count(&spec, BatchNorm::ScaleShift).unwrap() - bn_in - bn_out,
        288 + 16_384
    );

    // Bare weights reproduce the ~8.85x figure quoted for this block.
    let weight_ratio: f64 = 147_456.0 / 16_672.0;
    assert!((weight_ratio - 8.85).abs() < 0.01);
}

#[test]
fn zero_channels_fail_before_any_arithmetic() {
    let err = ConvBlockSpec::new(3, 0, 512, 2).err().unwrap();
    assert_eq!(
        err,
        DetPostError::NonPositiveField {
            field: "input_channels",
            value: 0,
        }
    );
}

#[test]
fn convention_is_applied_to_both_blocks() {
    let spec = ConvBlockSpec::new(5, 16, 64, 1).unwrap();
    for convention in [BatchNorm::ScaleShift, BatchNorm::WithRunningStats] {
        let report = param_report(&spec, convention).unwrap();
        // Switching convention moves both counts by the same per-channel rule.
        assert_eq!(
            report.vanilla,
            5 * 5 * 16 * 64 + convention.param_count(64)
        );
        assert_eq!(
            report.separable,
            5 * 5 * 16 + convention.param_count(16) + 16 * 64 + convention.param_count(64)
        );
    }
}

#[test]
fn ratio_grows_with_output_channels() {
    // The separable saving approaches k^2 as output channels grow.
    let narrow = ConvBlockSpec::conventional(32, 64).unwrap();
    let wide = ConvBlockSpec::conventional(32, 1024).unwrap();
    let convention = BatchNorm::default();
    assert!(
        reduction_ratio(&narrow, convention).unwrap()
            < reduction_ratio(&wide, convention).unwrap()
    );
    assert!(reduction_ratio(&wide, convention).unwrap() < 9.0);
}
