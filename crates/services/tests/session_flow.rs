use civics_core::QuestionCatalog;
use civics_core::model::{Category, DynamicField, Question, QuestionDraft};
use civics_core::stats::Mastery;
use civics_core::time::fixed_clock;
use rand::SeedableRng;
use rand::rngs::StdRng;
use services::{AppServices, SessionError, SessionPhase, StorageConfig};
use storage::repository::{InMemoryRepository, Storage};

fn build_catalog() -> QuestionCatalog {
    let questions: Vec<Question> = (1..=100)
        .map(|id| {
            QuestionDraft {
                id,
                prompt: format!("Question {id}"),
                answers: vec![format!("Answer {id}")],
                category: Category::ALL[(id as usize) % Category::ALL.len()],
                subcategory: "Mixed".into(),
                is_asterisk: id % 5 == 0,
                is_dynamic_answer: id == 28,
                dynamic_field: (id == 28).then_some(DynamicField::President),
            }
            .validate()
            .unwrap()
        })
        .collect();
    QuestionCatalog::new(questions).unwrap()
}

fn services_on(repo: &InMemoryRepository) -> AppServices {
    AppServices::with_storage(
        build_catalog(),
        Storage::from_blob_store(repo.clone()),
        fixed_clock(),
    )
}

#[test]
fn exam_verdicts_at_the_threshold() {
    let mut services = services_on(&InMemoryRepository::new());
    let mut rng = StdRng::seed_from_u64(21);

    let mut engine = services.new_session(services.exam_config());
    engine.start(services.catalog(), &mut rng).unwrap();
    for answer in [true, true, true, true, true, true, false, false, false, false] {
        engine.submit(answer, services.progress_mut()).unwrap();
    }
    assert_eq!(engine.passed(), Some(true));

    engine.restart(services.catalog(), &mut rng).unwrap();
    for answer in [false, true, false, true, false, true, false, true, false, true] {
        engine.submit(answer, services.progress_mut()).unwrap();
    }
    let results = engine.results().unwrap();
    assert_eq!(results.correct, 5);
    assert_eq!(results.passed, Some(false));
}

#[test]
fn flagged_exam_only_draws_flagged_questions() {
    let mut services = services_on(&InMemoryRepository::new());
    services.settings_mut().set_flagged_only(true);

    let mut engine = services.new_session(services.exam_config());
    engine
        .start(services.catalog(), &mut StdRng::seed_from_u64(5))
        .unwrap();

    assert_eq!(engine.questions().len(), 10);
    assert!(engine.questions().iter().all(Question::is_asterisk));
}

#[test]
fn progress_survives_a_reload() {
    let repo = InMemoryRepository::new();
    let mut services = services_on(&repo);

    let mut engine = services.new_session(services.practice_config(5));
    engine
        .start(services.catalog(), &mut StdRng::seed_from_u64(9))
        .unwrap();
    let asked: Vec<_> = engine.questions().iter().map(Question::id).collect();
    while engine.phase() == SessionPhase::Active {
        engine.submit(false, services.progress_mut()).unwrap();
    }
    assert_eq!(
        engine.submit(true, services.progress_mut()),
        Err(SessionError::Completed)
    );

    let reloaded = services_on(&repo);
    let stats = reloaded.stats();
    assert_eq!(stats.seen, 5);
    assert_eq!(stats.seen_percentage, 5);
    for id in asked {
        let record = reloaded.progress().get(id).unwrap();
        assert_eq!(record.seen_count(), 1);
        assert_eq!(record.incorrect_count(), 1);
        assert_eq!(reloaded.progress().status(id), Mastery::Learning);
    }
}

#[test]
fn dynamic_answer_follows_settings() {
    let catalog = build_catalog();
    let mut services = AppServices::open(catalog, &StorageConfig::in_memory()).unwrap();
    let question = services
        .catalog()
        .get(civics_core::model::QuestionId::new(28))
        .unwrap()
        .clone();

    services
        .settings_mut()
        .set_dynamic_answer(DynamicField::President, "Jane Doe");
    assert_eq!(
        civics_core::resolver::resolve(&question, services.settings().dynamic_answers()),
        vec!["Jane Doe".to_string()]
    );

    services
        .settings_mut()
        .set_dynamic_answer(DynamicField::President, "");
    assert_eq!(
        civics_core::resolver::resolve(&question, services.settings().dynamic_answers()),
        vec!["Answer 28".to_string()]
    );
}

#[test]
fn sqlite_backend_persists_between_opens() {
    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig::sqlite(dir.path().join("civics.sqlite3"));

    {
        let mut services = AppServices::open(build_catalog(), &config).unwrap();
        services.settings_mut().set_flagged_only(true);
        for _ in 0..5 {
            services
                .progress_mut()
                .record_answer(civics_core::model::QuestionId::new(7), true);
        }
    }

    let services = AppServices::open(build_catalog(), &config).unwrap();
    assert!(services.settings().flagged_only());
    assert_eq!(
        services
            .progress()
            .status(civics_core::model::QuestionId::new(7)),
        Mastery::Mastered
    );
}
