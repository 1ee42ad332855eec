use resume_classifier::{Category, ClassifiedDocument, ResumeClassifier};

fn sample() -> String {
    std::fs::read_to_string("tests/fixtures/sample_resume.txt").unwrap()
}

fn classify(text: &str) -> ClassifiedDocument {
    let mut classifier = ResumeClassifier::new(text, "Sample Person", "sample_resume.txt");
    classifier.classify().unwrap().clone()
}

fn line<'a>(doc: &'a ClassifiedDocument, text: &str) -> &'a resume_classifier::ClassifiedLine {
    doc.iter()
        .find(|l| l.text == text)
        .unwrap_or_else(|| panic!("no line {:?} in {:#?}", text, doc.lines()))
}

#[test]
fn one_record_per_line_in_order() {
    let mut classifier = ResumeClassifier::new(sample(), "Sample Person", ());
    let doc = classifier.classify().unwrap().clone();
    assert!(doc.len() >= 20);
    assert_eq!(doc.len(), classifier.number_of_lines());
    for (i, record) in doc.iter().enumerate() {
        assert_eq!(record.index, i);
        assert_eq!(record.text, classifier.lines().get(i).unwrap());
    }
}

#[test]
fn sample_fields() {
    let doc = classify(&sample());

    assert_eq!(doc.get(0).unwrap().fields.section_header.as_deref(), Some("Professional Summary"));
    assert_eq!(doc.get(0).unwrap().section.as_deref(), Some("Professional Summary"));
    assert!(doc.get(1).unwrap().fields.phone.is_none());

    assert_eq!(line(&doc, "555-555-5555").fields.get(Category::Phone), Some("555-555-5555"));
    assert_eq!(
        line(&doc, "sample.person@example.com").fields.email.as_deref(),
        Some("sample.person@example.com")
    );
    assert_eq!(line(&doc, "Account Executive").fields.profession.as_deref(), Some("Account Executive"));
    assert_eq!(
        line(&doc, "Senior Talent Partner").fields.profession.as_deref(),
        Some("Senior Talent Partner")
    );
    assert!(line(&doc, "• Cut average time to fill from 52 to 31 days").fields.bullet.is_some());
    assert!(line(&doc, "Greenhouse, Workday, LinkedIn Recruiter, Excel").fields.skill.is_some());
}

#[test]
fn tabs_and_space_runs_are_normalized() {
    let doc = classify(&sample());
    let acme = line(&doc, "Acme Corp,Toronto, ON,Sep 2015 - Present");
    assert_eq!(acme.cities, vec!["Toronto, ON"]);
    assert_eq!(acme.dates, vec!["Sep 2015"]);
    assert_eq!(acme.section.as_deref(), Some("Experience"));

    let widget = line(&doc, "Widget Co  ,,,,Chicago, IL  ,,,,June 2011 - Aug 2015");
    assert_eq!(widget.dates, vec!["June 2011", "Aug 2015"]);
    assert_eq!(widget.cities, vec!["Chicago, IL"]);

    let school = line(&doc, "University of Chicago,June 2008");
    assert_eq!(school.section.as_deref(), Some("Education"));
    assert_eq!(school.dates, vec!["June 2008"]);
}

#[test]
fn word_counts_skip_cities_and_dates() {
    let doc = classify(&sample());
    assert_eq!(line(&doc, "Toronto, Ontario").word_count, 0);
    // "Acme", "Corp,,", "-", "Present"
    assert_eq!(line(&doc, "Acme Corp,Toronto, ON,Sep 2015 - Present").word_count, 4);
}

#[test]
fn lines_before_first_header_have_no_section() {
    let doc = classify("Sample Person\n555 555 5555\nEducation\nBA, Economics");
    let sections: Vec<Option<&str>> = doc.iter().map(|l| l.section.as_deref()).collect();
    assert_eq!(sections, vec![None, None, Some("Education"), Some("Education")]);
}

#[test]
fn json_output_shape() {
    let doc = classify("Project Coordinator\n555.555.5555");
    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 2);
    assert_eq!(json[0]["profession"], "Project Coordinator");
    assert_eq!(json[1]["phone"], "555.555.5555");
    assert!(json[1]["section"].is_null());
}
