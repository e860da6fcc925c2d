// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and an in-memory capacity service.

use crate::{
    AppointmentSlotDto, AppointmentSlotsResponse, BaseResponse, CapacityAppointmentSlotResponse,
    CapacityPage, CapacityService, CapacityStreamDto, CapacityStreamResponse,
    CapacityStreamSlotsDto, ClientConfig, ClientError, DateRangeDto, DateRangeListResponse,
    DeleteCapacityResponse, HierarchyResponse, HoursDto, MarketDto, SlotDaysDto, StateDto,
    TableDataResponse, TerritoryDto, TerritorySlotsDto, UpdateCapacityRequest,
    UpdateCapacityResponse,
};
use async_trait::async_trait;
use capacity_domain::DayName;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

fn territory(id: i64, name: &str) -> TerritoryDto {
    TerritoryDto {
        id,
        territory: name.to_string(),
    }
}

/// Ohio { Columbus { 1, 2 }, Dayton { 3, 4 } }, Texas { Austin { 5 } }
pub fn create_test_hierarchy() -> Vec<StateDto> {
    vec![
        StateDto {
            state: String::from("Ohio"),
            markets: vec![
                MarketDto {
                    market: String::from("Columbus"),
                    service_territories: vec![
                        territory(1, "Columbus North"),
                        territory(2, "Columbus South"),
                    ],
                },
                MarketDto {
                    market: String::from("Dayton"),
                    service_territories: vec![
                        territory(3, "Dayton Metro"),
                        territory(4, "Dayton East"),
                    ],
                },
            ],
        },
        StateDto {
            state: String::from("Texas"),
            markets: vec![MarketDto {
                market: String::from("Austin"),
                service_territories: vec![territory(5, "Austin Central")],
            }],
        },
    ]
}

pub fn create_test_streams() -> Vec<CapacityStreamDto> {
    vec![
        CapacityStreamDto {
            cs_id: 1,
            capacity_stream: String::from("Install"),
        },
        CapacityStreamDto {
            cs_id: 2,
            capacity_stream: String::from("Repair"),
        },
    ]
}

fn slot(id: i64, start: &str, end: &str) -> AppointmentSlotDto {
    AppointmentSlotDto {
        apt_slot_id: id,
        apt_slot_start: start.to_string(),
        apt_slot_end: end.to_string(),
    }
}

/// Territory 1 has two Install windows and one Repair window; territory 2 has one Install window.
pub fn create_test_slot_catalog() -> Vec<TerritorySlotsDto> {
    vec![
        TerritorySlotsDto {
            service_territory_id: 1,
            service_territory: String::from("Columbus North"),
            capacity_stream_slots: vec![
                CapacityStreamSlotsDto {
                    capacity_stream: String::from("Install"),
                    appointment_slots: vec![
                        slot(11, "08:00", "12:00"),
                        slot(12, "12:00", "16:00"),
                    ],
                },
                CapacityStreamSlotsDto {
                    capacity_stream: String::from("Repair"),
                    appointment_slots: vec![slot(21, "08:00", "12:00")],
                },
            ],
        },
        TerritorySlotsDto {
            service_territory_id: 2,
            service_territory: String::from("Columbus South"),
            capacity_stream_slots: vec![CapacityStreamSlotsDto {
                capacity_stream: String::from("Install"),
                appointment_slots: vec![slot(31, "09:00", "13:00")],
            }],
        },
    ]
}

/// The default schedule (100) and one dated override (144).
pub fn create_test_date_ranges() -> Vec<DateRangeDto> {
    vec![
        DateRangeDto {
            cust_date_id: 100,
            start_date: None,
            end_date: None,
        },
        DateRangeDto {
            cust_date_id: 144,
            start_date: Some(String::from("03/11/2025")),
            end_date: Some(String::from("03/16/2025")),
        },
    ]
}

/// Install at 8h on Monday and slot 11 frozen on Monday.
pub fn create_test_table_data() -> CapacityAppointmentSlotResponse {
    CapacityAppointmentSlotResponse {
        base_capacity_hours: vec![HoursDto {
            capacity_stream_id: 1,
            days: BTreeMap::from([(DayName::Monday, 8.0)]),
        }],
        appointment_slots: vec![SlotDaysDto {
            appt_slot_id: 11,
            capacity_stream_id: 1,
            days: BTreeMap::from([(DayName::Monday, true)]),
        }],
    }
}

/// Canned responses and recorded calls of [`MockService`].
pub struct MockState {
    pub transport_down: bool,
    pub hierarchy_response: BaseResponse,
    pub date_ranges: Vec<DateRangeDto>,
    pub table_data: CapacityAppointmentSlotResponse,
    pub table_response: BaseResponse,
    pub update_response: UpdateCapacityResponse,
    pub delete_response: BaseResponse,
    pub table_queries: Vec<(i64, Option<i64>)>,
    pub updates: Vec<UpdateCapacityRequest>,
    pub deletes: Vec<i64>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            transport_down: false,
            hierarchy_response: BaseResponse::success("OK"),
            date_ranges: create_test_date_ranges(),
            table_data: create_test_table_data(),
            table_response: BaseResponse::success("OK"),
            update_response: UpdateCapacityResponse {
                default_capacity_view_responses: Vec::new(),
                base_response: BaseResponse::success("Updated"),
            },
            delete_response: BaseResponse::success("Calendarization deleted"),
            table_queries: Vec::new(),
            updates: Vec::new(),
            deletes: Vec::new(),
        }
    }
}

/// In-memory [`CapacityService`] whose state stays inspectable after the
/// page takes ownership of it.
#[derive(Clone, Default)]
pub struct MockService {
    pub state: Arc<Mutex<MockState>>,
}

impl MockService {
    fn check_transport(&self, endpoint: &str) -> Result<(), ClientError> {
        if self.state.lock().unwrap().transport_down {
            return Err(ClientError::Status {
                endpoint: endpoint.to_string(),
                status: 503,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl CapacityService for MockService {
    async fn get_hierarchy(&self) -> Result<HierarchyResponse, ClientError> {
        self.check_transport("hierarchy")?;
        Ok(HierarchyResponse {
            state_data: create_test_hierarchy(),
            last_updated_date: None,
            base_response: self.state.lock().unwrap().hierarchy_response.clone(),
        })
    }

    async fn get_capacity_streams(&self) -> Result<CapacityStreamResponse, ClientError> {
        self.check_transport("streams")?;
        Ok(CapacityStreamResponse {
            capacity_stream: create_test_streams(),
            last_updated_date: None,
            base_response: BaseResponse::success("OK"),
        })
    }

    async fn get_appointment_slots(&self) -> Result<AppointmentSlotsResponse, ClientError> {
        self.check_transport("slots")?;
        Ok(AppointmentSlotsResponse {
            service_territories: create_test_slot_catalog(),
            last_updated_date: None,
            base_response: BaseResponse::success("OK"),
        })
    }

    async fn get_date_ranges(
        &self,
        _territory_id: i64,
    ) -> Result<DateRangeListResponse, ClientError> {
        self.check_transport("date ranges")?;
        Ok(DateRangeListResponse {
            date_range_list: self.state.lock().unwrap().date_ranges.clone(),
            base_response: BaseResponse::success("OK"),
        })
    }

    async fn get_table_data(
        &self,
        territory_id: i64,
        cust_date_id: Option<i64>,
    ) -> Result<TableDataResponse, ClientError> {
        self.check_transport("table data")?;
        let mut state = self.state.lock().unwrap();
        state.table_queries.push((territory_id, cust_date_id));
        Ok(TableDataResponse {
            capacity_appointment_slot_response: state.table_data.clone(),
            last_updated_date: None,
            base_response: state.table_response.clone(),
        })
    }

    async fn update_capacity(
        &self,
        request: &UpdateCapacityRequest,
    ) -> Result<UpdateCapacityResponse, ClientError> {
        self.check_transport("update")?;
        let mut state = self.state.lock().unwrap();
        state.updates.push(request.clone());
        Ok(state.update_response.clone())
    }

    async fn delete_capacity(
        &self,
        cust_date_id: i64,
    ) -> Result<DeleteCapacityResponse, ClientError> {
        self.check_transport("delete")?;
        let mut state = self.state.lock().unwrap();
        state.deletes.push(cust_date_id);
        Ok(DeleteCapacityResponse {
            base_response: state.delete_response.clone(),
        })
    }
}

pub fn create_test_config() -> ClientConfig {
    ClientConfig::new("http://localhost:3000", "planner-1")
}

/// A bootstrapped page and a handle on its service.
pub async fn create_test_page() -> (CapacityPage<MockService>, MockService) {
    let service: MockService = MockService::default();
    let mut page: CapacityPage<MockService> =
        CapacityPage::new(service.clone(), create_test_config());
    page.bootstrap().await.unwrap();
    (page, service)
}

/// A page with Columbus North selected.
pub async fn create_columbus_north_page() -> (CapacityPage<MockService>, MockService) {
    let (mut page, service) = create_test_page().await;
    page.select_territory("Ohio", "Columbus", "Columbus North")
        .await
        .unwrap();
    (page, service)
}
