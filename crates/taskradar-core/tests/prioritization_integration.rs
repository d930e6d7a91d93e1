//! Integration tests for the scoring -> classification -> plot pipeline.

use std::time::Duration;

use taskradar_core::plot::MarkerScale;
use taskradar_core::task::query::group_by_priority;
use taskradar_core::{
    classify, KeywordClassifier, KeywordScorer, NewTask, PlotCanvas, Priority, Scorer, TaskQuery,
    TaskSource, TaskStore,
};

#[test]
fn test_reference_scenarios() {
    let scorer = KeywordScorer::new();

    let incident = scorer.score("緊急システム障害対応", None);
    assert_eq!((incident.urgency(), incident.importance()), (10, 3));
    assert_eq!(incident.priority(), Priority::UrgentNotImportant);

    let report = scorer.score("重要なプロジェクト報告", None);
    assert_eq!(report.urgency(), 3);
    assert!(report.importance() >= 8);
    assert_eq!(report.priority(), Priority::NotUrgentImportant);

    let chores = scorer.score("オフィス備品の発注", Some(""));
    assert_eq!((chores.urgency(), chores.importance()), (3, 3));
    assert_eq!(chores.priority(), Priority::NotUrgentNotImportant);
}

#[test]
fn test_classify_agrees_with_scorer() {
    let scorer = KeywordScorer::new();
    for title in ["今日締切の提出物", "来週のリリース", "明日の打ち合わせ", "SNSチェック"] {
        let scores = scorer.score(title, None);
        assert_eq!(
            classify(i32::from(scores.urgency()), i32::from(scores.importance())),
            scores.priority(),
            "{title}"
        );
    }
}

#[test]
fn test_canvas_corners() {
    let canvas = PlotCanvas::new(800.0, 600.0, 60.0).unwrap();
    assert_eq!(canvas.map_to_coordinates(10.0, 10.0), (60.0, 60.0));
    assert_eq!(canvas.map_to_coordinates(0.0, 0.0), (740.0, 540.0));
}

#[tokio::test]
async fn test_full_pipeline_through_store_and_plot() {
    let dir = tempfile::tempdir().unwrap();
    let store = TaskStore::open_at(dir.path().join("tasks.json"));
    let classifier = KeywordClassifier::new();

    let inputs = [
        ("緊急システム障害対応", Some("本番環境で発生した重大な障害"), "member-1"),
        ("プロジェクト報告書作成", Some("クライアントへの月次報告書"), "member-1"),
        ("メールの整理", None, "member-2"),
    ];
    for (title, description, member) in inputs {
        let mut new_task = NewTask::new(title)
            .unwrap()
            .with_source(TaskSource::Mail)
            .with_assignee(member);
        if let Some(description) = description {
            new_task = new_task.with_description(description);
        }
        let task = new_task
            .classify(&classifier, Duration::from_secs(1))
            .await
            .unwrap();
        store.insert(&task).unwrap();
    }

    let tasks = store.list().unwrap();
    assert_eq!(tasks.len(), 3);

    let priorities: Vec<_> = tasks.iter().map(|t| t.priority()).collect();
    assert_eq!(
        priorities,
        vec![
            Priority::UrgentImportant,
            Priority::NotUrgentImportant,
            Priority::NotUrgentNotImportant,
        ]
    );

    let groups = group_by_priority(&tasks);
    assert!(groups[2].1.is_empty());

    let query = TaskQuery {
        members: vec!["member-1".into()],
        ..Default::default()
    };
    let selected: Vec<_> = query.apply(&tasks).into_iter().cloned().collect();
    assert_eq!(selected.len(), 2);

    let layout = PlotCanvas::default().layout(&selected);
    assert_eq!(layout.points.len(), 2);
    assert_eq!(layout.regions.len(), 4);

    let scale = MarkerScale::default();
    let incident = &layout.points[0];
    assert_eq!(incident.priority, Priority::UrgentImportant);
    assert!(scale.size(incident.relative_size) > scale.size(layout.points[1].relative_size));

    for point in &layout.points {
        assert!(point.x >= 60.0 && point.x <= 740.0);
        assert!(point.y >= 60.0 && point.y <= 540.0);
    }

    let json = serde_json::to_value(&layout).unwrap();
    assert_eq!(json["canvas"]["width"], 800.0);
    assert_eq!(json["points"][0]["priority"], "urgent-important");
}
