mod test_leave_abandons_pending_consume;
mod test_leave_requires_room;
mod test_rejoin_after_leave;
