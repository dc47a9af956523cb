//! Hierarchical program editor: Program → ProgramDay → DayTour.
//!
//! All three levels share one selected-program context. Mutations are
//! permission-gated through [`Session::can_manage`], every success closes
//! the owning dialog and re-fetches the owning list, and every failure maps
//! to a fixed notice per operation while the underlying error goes to the
//! log.

use crate::forms::{DayForm, FormError, ProgramForm, ServiceForm, TourForm};
use crate::session::Session;
use crate::storage::repository::{
    CategoryDto, CategoryRepository, CityDto, CityRepository, CountryDto, CountryRepository,
    DayDto, ItineraryRepository, ProgramDto, ProgramRepository, ServiceDto, ServiceRepository,
};
use log::error;
use sea_orm::{DatabaseConnection, DbErr};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// One dialog's state. Creating and editing never coexist, so this is a
/// tagged union instead of a bool plus a nullable target.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DialogState<T> {
    #[default]
    Closed,
    Creating,
    Editing(T),
}

impl<T> DialogState<T> {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }
}

/// Which list the screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorView {
    #[default]
    Programs,
    Days,
}

/// User-facing toast payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
}

impl Notice {
    fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum EditorError {
    /// Fixed per-operation notice; the cause is already logged.
    #[error("{notice}")]
    Store {
        notice: &'static str,
        #[source]
        source: DbErr,
    },
    #[error(transparent)]
    Form(#[from] FormError),
    #[error("غير مصرح لك بإدارة البرامج")]
    Forbidden,
    #[error("لم يتم اختيار برنامج")]
    NoProgramSelected,
    #[error("البرنامج غير موجود")]
    ProgramNotFound,
}

fn store_err(notice: &'static str) -> impl FnOnce(DbErr) -> EditorError {
    move |source| {
        error!("{}: {}", notice, source);
        EditorError::Store { notice, source }
    }
}

const LOAD_FAILED: &str = "حدث خطأ في تحميل البيانات";
const SAVE_PROGRAM_FAILED: &str = "حدث خطأ في حفظ البرنامج";
const DELETE_PROGRAM_FAILED: &str = "حدث خطأ في حذف البرنامج";
const SAVE_DAY_FAILED: &str = "حدث خطأ في حفظ اليوم";
const DELETE_DAY_FAILED: &str = "حدث خطأ في حذف اليوم";
const SAVE_TOUR_FAILED: &str = "حدث خطأ في حفظ الجولة";
const DELETE_TOUR_FAILED: &str = "حدث خطأ في حذف الجولة";
const SAVE_SERVICE_FAILED: &str = "حدث خطأ في حفظ الخدمة";
const DELETE_SERVICE_FAILED: &str = "حدث خطأ في حذف الخدمة";

/// Everything the aggregate screen loads up front. The five reference
/// queries run concurrently.
#[derive(Debug, Clone, Default)]
pub struct AggregateData {
    pub programs: Vec<ProgramDto>,
    pub countries: Vec<CountryDto>,
    pub cities: Vec<CityDto>,
    pub categories: Vec<CategoryDto>,
    pub services: Vec<ServiceDto>,
}

pub struct ProgramEditor {
    db: Arc<DatabaseConnection>,
    session: Session,
    data: AggregateData,
    selected_program: Option<ProgramDto>,
    days: Vec<DayDto>,
    view: EditorView,
    pub program_dialog: DialogState<ProgramDto>,
    pub day_dialog: DialogState<DayDto>,
    /// Tour dialogs are keyed by the owning day.
    pub tour_dialog: DialogState<(String, crate::storage::repository::TourDto)>,
}

impl ProgramEditor {
    pub fn new(db: Arc<DatabaseConnection>, session: Session) -> Self {
        Self {
            db,
            session,
            data: AggregateData::default(),
            selected_program: None,
            days: Vec::new(),
            view: EditorView::default(),
            program_dialog: DialogState::Closed,
            day_dialog: DialogState::Closed,
            tour_dialog: DialogState::Closed,
        }
    }

    pub fn programs(&self) -> &[ProgramDto] {
        &self.data.programs
    }

    pub fn reference_data(&self) -> &AggregateData {
        &self.data
    }

    pub fn selected_program(&self) -> Option<&ProgramDto> {
        self.selected_program.as_ref()
    }

    pub fn days(&self) -> &[DayDto] {
        &self.days
    }

    pub fn view(&self) -> EditorView {
        self.view
    }

    fn require_manage(&self) -> Result<(), EditorError> {
        if self.session.can_manage {
            Ok(())
        } else {
            Err(EditorError::Forbidden)
        }
    }

    /// Loads programs plus the reference lists the pickers need.
    pub async fn fetch_all(&mut self) -> Result<(), EditorError> {
        let db = self.db.as_ref();
        let (programs, countries, cities, categories, services) = tokio::try_join!(
            ProgramRepository::list_all(db),
            CountryRepository::list_all(db),
            CityRepository::list_all(db),
            CategoryRepository::list_all(db),
            ServiceRepository::list_all(db),
        )
        .map_err(store_err(LOAD_FAILED))?;

        self.data = AggregateData {
            programs,
            countries,
            cities,
            categories,
            services,
        };

        // 保持所选程序与最新数据一致
        if let Some(selected) = &self.selected_program {
            let id = selected.id.clone();
            self.selected_program = self.data.programs.iter().find(|p| p.id == id).cloned();
            if self.selected_program.is_none() {
                self.days.clear();
                self.view = EditorView::Programs;
            }
        }

        Ok(())
    }

    /// Sets the active program, pulls its day+tour subtree and switches the
    /// view to Days.
    pub async fn select_program(&mut self, program_id: &str) -> Result<(), EditorError> {
        let program = self
            .data
            .programs
            .iter()
            .find(|p| p.id == program_id)
            .cloned()
            .ok_or(EditorError::ProgramNotFound)?;

        let days = ItineraryRepository::list_days_with_tours(self.db.as_ref(), program_id)
            .await
            .map_err(store_err(LOAD_FAILED))?;

        self.selected_program = Some(program);
        self.days = days;
        self.view = EditorView::Days;
        Ok(())
    }

    /// Re-pulls the selected program's subtree. On failure the previous day
    /// list stays as it was; there is never a partial update.
    pub async fn refresh_days(&mut self) -> Result<(), EditorError> {
        let program_id = self
            .selected_program
            .as_ref()
            .map(|p| p.id.clone())
            .ok_or(EditorError::NoProgramSelected)?;
        self.days = ItineraryRepository::list_days_with_tours(self.db.as_ref(), &program_id)
            .await
            .map_err(store_err(LOAD_FAILED))?;
        Ok(())
    }

    pub fn open_create_program(&mut self) {
        self.program_dialog = DialogState::Creating;
    }

    pub fn open_edit_program(&mut self, program: ProgramDto) {
        self.program_dialog = DialogState::Editing(program);
    }

    /// Insert or full-row update depending on the dialog state. Success
    /// closes the dialog and re-runs the aggregate fetch.
    pub async fn create_or_update_program(
        &mut self,
        form: ProgramForm,
    ) -> Result<Notice, EditorError> {
        self.require_manage()?;
        let def = form.into_definition()?;
        let db = self.db.as_ref();

        let notice = match &self.program_dialog {
            DialogState::Editing(target) => {
                ProgramRepository::update(db, &target.id, def)
                    .await
                    .map_err(store_err(SAVE_PROGRAM_FAILED))?;
                Notice::new("تم التحديث بنجاح", "تم تحديث البرنامج بنجاح")
            }
            _ => {
                ProgramRepository::insert(db, def)
                    .await
                    .map_err(store_err(SAVE_PROGRAM_FAILED))?;
                Notice::new("تم الإضافة بنجاح", "تم إضافة البرنامج الجديد بنجاح")
            }
        };

        self.program_dialog = DialogState::Closed;
        self.fetch_all().await?;
        Ok(notice)
    }

    pub async fn delete_program(&mut self, id: &str) -> Result<Notice, EditorError> {
        self.require_manage()?;
        ProgramRepository::delete_by_id(self.db.as_ref(), id)
            .await
            .map_err(store_err(DELETE_PROGRAM_FAILED))?;
        self.fetch_all().await?;
        Ok(Notice::new("تم الحذف بنجاح", "تم حذف البرنامج بنجاح"))
    }

    /// Seed value for a new day form.
    pub async fn next_day_number(&self) -> Result<i32, EditorError> {
        let program_id = self
            .selected_program
            .as_ref()
            .map(|p| p.id.clone())
            .ok_or(EditorError::NoProgramSelected)?;
        ItineraryRepository::next_day_number(self.db.as_ref(), &program_id)
            .await
            .map_err(store_err(LOAD_FAILED))
    }

    pub fn open_create_day(&mut self) {
        self.day_dialog = DialogState::Creating;
    }

    pub fn open_edit_day(&mut self, day: DayDto) {
        self.day_dialog = DialogState::Editing(day);
    }

    pub async fn create_or_update_day(&mut self, form: DayForm) -> Result<Notice, EditorError> {
        self.require_manage()?;
        let program_id = self
            .selected_program
            .as_ref()
            .map(|p| p.id.clone())
            .ok_or(EditorError::NoProgramSelected)?;
        let def = form.into_definition()?;
        let db = self.db.as_ref();

        let notice = match &self.day_dialog {
            DialogState::Editing(target) => {
                ItineraryRepository::update_day(db, &target.id, def)
                    .await
                    .map_err(store_err(SAVE_DAY_FAILED))?;
                Notice::new("تم التحديث بنجاح", "تم تحديث اليوم بنجاح")
            }
            _ => {
                ItineraryRepository::insert_day(db, &program_id, def)
                    .await
                    .map_err(store_err(SAVE_DAY_FAILED))?;
                Notice::new("تم الإضافة بنجاح", "تم إضافة اليوم الجديد بنجاح")
            }
        };

        self.day_dialog = DialogState::Closed;
        self.refresh_days().await?;
        Ok(notice)
    }

    /// Deleting a day removes its tours through the store cascade.
    pub async fn delete_day(&mut self, id: &str) -> Result<Notice, EditorError> {
        self.require_manage()?;
        ItineraryRepository::delete_day(self.db.as_ref(), id)
            .await
            .map_err(store_err(DELETE_DAY_FAILED))?;
        self.refresh_days().await?;
        Ok(Notice::new("تم الحذف بنجاح", "تم حذف اليوم وجولاته بنجاح"))
    }

    pub fn open_create_tour(&mut self) {
        self.tour_dialog = DialogState::Creating;
    }

    pub fn open_edit_tour(&mut self, day_id: String, tour: crate::storage::repository::TourDto) {
        self.tour_dialog = DialogState::Editing((day_id, tour));
    }

    pub async fn create_or_update_tour(
        &mut self,
        form: TourForm,
        day_id: &str,
    ) -> Result<Notice, EditorError> {
        self.require_manage()?;
        let def = form.into_definition()?;
        let db = self.db.as_ref();

        let notice = match &self.tour_dialog {
            DialogState::Editing((_, target)) => {
                ItineraryRepository::update_tour(db, &target.id, def)
                    .await
                    .map_err(store_err(SAVE_TOUR_FAILED))?;
                Notice::new("تم التحديث بنجاح", "تم تحديث الجولة بنجاح")
            }
            _ => {
                ItineraryRepository::insert_tour(db, day_id, def)
                    .await
                    .map_err(store_err(SAVE_TOUR_FAILED))?;
                Notice::new("تم الإضافة بنجاح", "تم إضافة الجولة الجديدة بنجاح")
            }
        };

        self.tour_dialog = DialogState::Closed;
        self.refresh_days().await?;
        Ok(notice)
    }

    pub async fn delete_tour(&mut self, id: &str) -> Result<Notice, EditorError> {
        self.require_manage()?;
        ItineraryRepository::delete_tour(self.db.as_ref(), id)
            .await
            .map_err(store_err(DELETE_TOUR_FAILED))?;
        self.refresh_days().await?;
        Ok(Notice::new("تم الحذف بنجاح", "تم حذف الجولة بنجاح"))
    }

    /// The services tab shares the aggregate screen and its refetch.
    pub async fn create_or_update_service(
        &mut self,
        form: ServiceForm,
        editing_id: Option<&str>,
    ) -> Result<Notice, EditorError> {
        self.require_manage()?;
        let def = form.into_definition()?;
        let db = self.db.as_ref();

        let notice = match editing_id {
            Some(id) => {
                ServiceRepository::update(db, id, def)
                    .await
                    .map_err(store_err(SAVE_SERVICE_FAILED))?;
                Notice::new("تم التحديث بنجاح", "تم تحديث الخدمة بنجاح")
            }
            None => {
                ServiceRepository::insert(db, def)
                    .await
                    .map_err(store_err(SAVE_SERVICE_FAILED))?;
                Notice::new("تم الإضافة بنجاح", "تم إضافة الخدمة الجديدة بنجاح")
            }
        };

        self.fetch_all().await?;
        Ok(notice)
    }

    pub async fn delete_service(&mut self, id: &str) -> Result<Notice, EditorError> {
        self.require_manage()?;
        ServiceRepository::delete_by_id(self.db.as_ref(), id)
            .await
            .map_err(store_err(DELETE_SERVICE_FAILED))?;
        self.fetch_all().await?;
        Ok(Notice::new("تم الحذف بنجاح", "تم حذف الخدمة بنجاح"))
    }
}
