//! trybuild 编译期测试

#[test]
fn trybuild_derive_macros() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/injectable_sequence.rs");
    t.pass("tests/trybuild/component_contracts.rs");
}
