use speculate2::speculate;

speculate! {
    use grantflow::db::StoreError;
    use grantflow::models::*;
    use grantflow::Database;

    fn setup_db() -> Database {
        let db = Database::open_in_memory().expect("Failed to create test database");
        db.migrate().expect("Failed to apply schema");
        db
    }

    fn project_ref(raw: &str) -> ProjectRef {
        ProjectRef::parse(raw).expect("Failed to parse identifier")
    }

    fn section_input(section_id: &str, content: &str) -> SectionUpsertInput {
        SectionUpsertInput {
            section_id: section_id.into(),
            title: None,
            description: None,
            content: content.into(),
            status: None,
            required: None,
            has_warning: None,
        }
    }

    describe "project resolution" {
        it "creates a demo project exactly once" {
            let db = setup_db();
            let id = project_ref("demo-spring");

            let first = db.resolve_or_create(&id).unwrap();
            let second = db.resolve_or_create(&id).unwrap();

            assert_eq!(first.id, "demo-spring");
            assert_eq!(second.created_at, first.created_at);
            assert_eq!(db.list_projects().unwrap().len(), 1);
        }

        it "does not create projects for native identifiers" {
            let db = setup_db();
            let id = project_ref(&uuid::Uuid::new_v4().to_string());

            let err = db.resolve_or_create(&id).unwrap_err();
            assert!(matches!(err, StoreError::NotFound));
            assert!(db.list_projects().unwrap().is_empty());
        }

        it "finds explicitly created projects by their native id" {
            let db = setup_db();
            let created = db.create_project(CreateProjectInput {
                name: "Harbor Restoration".into(),
                description: None,
            }).unwrap();

            let found = db.resolve_or_create(&project_ref(&created.id)).unwrap();
            assert_eq!(found.name, "Harbor Restoration");
        }
    }

    describe "section upserts" {
        it "appends a new entry with a computed word count" {
            let db = setup_db();
            let id = project_ref("demo-spring");

            let project = db.upsert_section(&id, section_input("s1", "Hello world")).unwrap();

            assert_eq!(project.sections.len(), 1);
            let section = &project.sections[0];
            assert_eq!(section.id, "s1");
            assert_eq!(section.word_count, 2);
            assert_eq!(section.status, SectionStatus::InProgress);
        }

        it "mutates the matching entry and leaves the rest alone" {
            let db = setup_db();
            let id = project_ref("demo-spring");
            db.upsert_section(&id, section_input("s1", "first section")).unwrap();
            db.upsert_section(&id, section_input("s2", "second section")).unwrap();
            let before = db.get_project(&id).unwrap().unwrap();

            let project = db.upsert_section(&id, SectionUpsertInput {
                status: Some(SectionStatus::Completed),
                ..section_input("s1", "Hello world and more")
            }).unwrap();

            assert_eq!(project.sections.len(), 2);
            assert_eq!(project.sections[0].status, SectionStatus::Completed);
            assert_eq!(project.sections[0].word_count, 4);
            assert_eq!(project.sections[0].created_at, before.sections[0].created_at);
            assert_eq!(project.sections[1], before.sections[1]);
        }

        it "keeps the previous status when the payload omits it" {
            let db = setup_db();
            let id = project_ref("demo-spring");
            db.upsert_section(&id, SectionUpsertInput {
                status: Some(SectionStatus::Draft),
                ..section_input("s1", "draft words")
            }).unwrap();

            let project = db.upsert_section(&id, section_input("s1", "revised words")).unwrap();
            assert_eq!(project.sections[0].status, SectionStatus::Draft);
        }

        it "is idempotent apart from timestamps" {
            let db = setup_db();
            let id = project_ref("demo-spring");
            let payload = section_input("s1", "same words every time");

            let first = db.upsert_section(&id, payload.clone()).unwrap();
            let second = db.upsert_section(&id, payload).unwrap();

            assert_eq!(second.sections.len(), first.sections.len());
            let a = &first.sections[0];
            let b = &second.sections[0];
            assert_eq!(b.content, a.content);
            assert_eq!(b.word_count, a.word_count);
            assert_eq!(b.status, a.status);
            assert_eq!(b.created_at, a.created_at);
        }
    }

    describe "field updates" {
        it "never moves updated_at backwards" {
            let db = setup_db();
            let id = project_ref("demo-spring");
            let created = db.resolve_or_create(&id).unwrap();

            let renamed = db.update_project(&id, UpdateProjectInput {
                name: Some("Spring Cohort".into()),
                description: None,
            }).unwrap();

            assert!(renamed.updated_at >= created.updated_at);
            assert_eq!(renamed.name, "Spring Cohort");
        }

        it "replace keeps sections intact" {
            let db = setup_db();
            let id = project_ref("demo-spring");
            db.upsert_section(&id, section_input("s1", "keep me")).unwrap();

            let replaced = db.replace_project(&id, CreateProjectInput {
                name: "Spring Cohort".into(),
                description: Some("Rewritten".into()),
            }).unwrap();

            assert_eq!(replaced.name, "Spring Cohort");
            assert_eq!(replaced.description.as_deref(), Some("Rewritten"));
            assert_eq!(replaced.sections.len(), 1);
        }
    }

    describe "durability" {
        it "sections survive a store reopen" {
            let dir = tempfile::tempdir().expect("Failed to create temp dir");
            let path = dir.path().join("grantflow.db");

            {
                let db = Database::open(&path).expect("Failed to open store");
                db.migrate().expect("Failed to apply schema");
                db.upsert_section(&project_ref("demo-spring"), section_input("s1", "durable words")).unwrap();
            }

            let db = Database::open(&path).expect("Failed to reopen store");
            db.migrate().expect("Failed to apply schema");
            let project = db.get_project(&project_ref("demo-spring")).unwrap().unwrap();
            assert_eq!(project.sections[0].content, "durable words");
        }
    }
}
