use easytask::output::HumanOutput;

#[test]
fn human_output_includes_sections() {
    let mut human = HumanOutput::new("easytask parse: 2 task(s)");
    human.push_summary("path", "/tmp/preferences.json");
    human.push_detail("buy milk");
    human.push_warning("input contained no non-empty tasks");

    let rendered = human.to_string();
    assert!(rendered.contains("easytask parse: 2 task(s)"));
    assert!(rendered.contains("Summary:"));
    assert!(rendered.contains("- path: /tmp/preferences.json"));
    assert!(rendered.contains("Details:"));
    assert!(rendered.contains("- buy milk"));
    assert!(rendered.contains("Warnings:"));
    assert!(!rendered.contains("Next steps:"));
}

#[test]
fn human_output_omits_empty_sections() {
    let human = HumanOutput::new("easytask prefs");
    assert_eq!(human.to_string(), "easytask prefs");
}
