use super::common::*;

use crate::error::ServiceError;
use crate::packages::{
    PackageFilter, PackageQuery, PackageSort, PackageSortField, PackageStatus,
};
use crate::repository::{PageRequest, RepositoryError, SortDirection};
use uuid::Uuid;

#[tokio::test]
async fn add_forces_active_status() {
    let (service, repository) = build_service();
    let mut dto = package_dto("Basic Health Package");
    dto.status = Some(PackageStatus::Deactivated);

    let created = service.add(dto).await.expect("created");

    assert_eq!(created.status, Some(PackageStatus::Active));
    assert!(created.id.is_some());
    assert_eq!(repository.snapshot().len(), 1);
}

#[tokio::test]
async fn add_rejects_blank_name_without_storing() {
    let (service, repository) = build_service();

    let err = service.add(package_dto("  ")).await.expect_err("invalid");

    match err {
        ServiceError::Validation(err) => assert!(err.has_field("name")),
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(repository.snapshot().is_empty());
}

#[tokio::test]
async fn update_keeps_identity_and_status() {
    let (service, _) = build_service();
    let created = service.add(package_dto("Dental")).await.expect("created");
    let id = created.id.expect("id assigned");
    service.deactivate(id).await.expect("deactivated");

    let mut change = package_dto("Dental Plus");
    change.status = Some(PackageStatus::Active);
    change.contributions = 42.5;
    let updated = service.update(id, change).await.expect("updated");

    assert_eq!(updated.id, Some(id));
    assert_eq!(updated.name, "Dental Plus");
    assert_eq!(updated.contributions, 42.5);
    assert_eq!(updated.status, Some(PackageStatus::Deactivated));
}

#[tokio::test]
async fn update_of_unknown_package_is_not_found() {
    let (service, repository) = build_service();

    let err = service
        .update(Uuid::new_v4(), package_dto("Vision"))
        .await
        .expect_err("missing");

    assert!(matches!(
        err,
        ServiceError::Repository(RepositoryError::NotFound)
    ));
    assert!(repository.snapshot().is_empty());
}

#[tokio::test]
async fn update_from_body_requires_an_id() {
    let (service, _) = build_service();

    let err = service
        .update_from_body(package_dto("Vision"))
        .await
        .expect_err("id required");

    match err {
        ServiceError::Validation(err) => assert!(err.has_field("id")),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn deactivate_is_idempotent_and_keeps_the_row() {
    let (service, repository) = build_service();
    let created = service.add(package_dto("Life")).await.expect("created");
    let id = created.id.expect("id assigned");

    let first = service.deactivate(id).await.expect("deactivated");
    let second = service.deactivate(id).await.expect("still deactivated");

    assert_eq!(first.status, Some(PackageStatus::Deactivated));
    assert_eq!(second, first);
    assert_eq!(repository.snapshot().len(), 1);
    assert_eq!(
        service.get(id).await.expect("still readable").status,
        Some(PackageStatus::Deactivated)
    );
}

#[tokio::test]
async fn filtered_pages_active_packages_by_name() {
    let (service, repository) = build_service();
    seed(&repository).await;

    let query = PackageQuery {
        filter: PackageFilter {
            name: None,
            status: Some(PackageStatus::Active),
        },
        sort: PackageSort::default(),
        page: PageRequest::new(0, 3),
    };
    let page = service.filtered(&query).await.expect("page");

    let names: Vec<_> = page.content.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Package A", "Package B", "Package C"]);
    assert_eq!(page.total_elements, 5);
    assert_eq!(page.total_pages, 2);

    let second = service
        .filtered(&PackageQuery {
            page: PageRequest::new(1, 3),
            ..query.clone()
        })
        .await
        .expect("page");
    let names: Vec<_> = second.content.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Package D", "Package E"]);
}

#[tokio::test]
async fn filtered_combines_name_and_descending_sort() {
    let (service, repository) = build_service();
    seed(&repository).await;

    let query = PackageQuery {
        filter: PackageFilter {
            name: Some("PACKAGE".to_string()),
            status: None,
        },
        sort: PackageSort {
            field: PackageSortField::Contributions,
            direction: SortDirection::Descending,
        },
        page: PageRequest::new(0, 10),
    };
    let page = service.filtered(&query).await.expect("page");

    assert_eq!(page.total_elements, 6);
    assert_eq!(page.content[0].name, "Package E");
    assert_eq!(page.content[5].name, "Package Archived");
}

#[tokio::test]
async fn page_past_the_end_is_empty_with_totals() {
    let (service, repository) = build_service();
    seed(&repository).await;

    let page = service
        .filtered(&PackageQuery {
            page: PageRequest::new(9, 3),
            ..PackageQuery::default()
        })
        .await
        .expect("page");

    assert!(page.content.is_empty());
    assert_eq!(page.total_elements, 6);
    assert_eq!(page.number, 9);
}
